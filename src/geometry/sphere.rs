use serde_derive::Deserialize;

use crate::colour::Colour;
use crate::geometry::ObjectId;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Vec3;
use crate::Intersection;

/// Hits closer than this to the ray origin are ignored, so a ray leaving a surface
/// does not immediately hit it again.
pub const EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Sphere {
    pub id: ObjectId,
    pub centre: Vec3<f64>,
    pub radius: f64,
    pub material: Material,
    pub colour: Colour,
}

impl Sphere {
    pub fn new(id: ObjectId, centre: Vec3<f64>, radius: f64, material: Material, colour: Colour) -> Self {
        Self { id, centre, radius, material, colour }
    }

    /// Nearest point in front of the ray origin where the ray enters or leaves the sphere.
    pub fn intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let l = self.centre - ray.origin();
        let tca = l.dot(ray.direction());
        let d2 = l.dot(&l) - tca * tca;
        let r2 = self.radius * self.radius;

        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).max(0.0).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        let t = if t0 > EPSILON {
            t0
        } else if t1 > EPSILON {
            t1
        } else {
            return None;
        };

        let point = ray.offset(t);
        // `point` lies `radius` away from the centre, so this is the normalised offset
        // without the zero-length failure case `unit` has to guard against.
        let normal = (point - self.centre).scale(1.0 / self.radius);

        Some(Intersection::new(t, point, normal, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            ObjectId(1),
            Vec3::new(0.0, 0.0, 0.0),
            1.0,
            Material::opaque(1.0),
            Colour::new(255.0, 0.0, 0.0),
        )
    }

    #[test]
    fn head_on_hit_at_distance_minus_radius() {
        let sphere = Sphere { radius: 2.0, ..unit_sphere() };
        let ray = Ray::new(Vec3::new(0.0, 0.0, -7.0), Vec3::new(0.0, 0.0, 3.0)).unwrap();

        let hit = sphere.intersection(&ray).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-12);
        assert_eq!(Vec3::new(0.0, 0.0, -2.0), hit.point);
        assert_eq!(ray.direction().inverse(), hit.normal);
        assert_eq!(ObjectId(1), hit.object.id);
    }

    #[test]
    fn offset_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.5, -5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();

        assert!(unit_sphere().intersection(&ray).is_none());
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();

        assert!(unit_sphere().intersection(&ray).is_none());
    }

    #[test]
    fn from_inside_hits_far_side() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();

        let sphere = unit_sphere();
        let hit = sphere.intersection(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-12);
        assert_eq!(Vec3::new(1.0, 0.0, 0.0), hit.normal);
    }

    #[test]
    fn ray_leaving_surface_skips_its_origin() {
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();

        let sphere = unit_sphere();
        let hit = sphere.intersection(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-12);
        assert_eq!(Vec3::new(1.0, 0.0, 0.0), hit.point);
    }

    #[test]
    fn oblique_hit_has_unit_normal() {
        let sphere = Sphere {
            centre: Vec3::new(1.0, -2.0, 3.0),
            radius: 2.5,
            ..unit_sphere()
        };
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.1, -0.15, 1.0)).unwrap();

        let hit = sphere.intersection(&ray).unwrap();
        let expected = (hit.point - sphere.centre).unit().unwrap();
        assert!((hit.normal.len() - 1.0).abs() < 1e-9);
        assert!((hit.normal - expected).len() < 1e-9);
    }
}
