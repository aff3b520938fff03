use crate::colour::Colour;
use crate::error::Result;
use crate::geometry::Sphere;
use crate::light::{DirectionalLight, PointLight};
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Everything needed to shade the point where a ray landed.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    /// Distance from the ray origin.
    pub distance: f64,
    pub point: Vec3<f64>,
    /// Outward unit normal at `point`.
    pub normal: Vec3<f64>,
    pub object: &'a Sphere,
    /// Secondary rays cast before landing here.
    pub bounces: u32,
    /// Transparent bodies passed before landing here.
    pub through_count: u32,
}

impl<'a> Intersection<'a> {
    pub fn new(distance: f64, point: Vec3<f64>, normal: Vec3<f64>, object: &'a Sphere) -> Self {
        Self {
            distance,
            point,
            normal,
            object,
            bounces: 0,
            through_count: 0,
        }
    }

    /// Colour seen at this intersection: the object's own emission plus every light
    /// that reaches it, added on top of `background`.
    pub fn terminal_rgb(
        &self,
        spheres: &[Sphere],
        background: Colour,
        directional_lights: &[DirectionalLight],
        point_lights: &[PointLight],
        max_bounces: u32,
    ) -> Result<Colour> {
        let object = self.object;
        let mut illumination = object.colour.scale(object.material.emissive);

        for light in directional_lights {
            let angle = self.normal.angle(&light.direction)?;
            illumination = illumination.add(&light.relative_strength(angle));
        }

        for light in point_lights.iter().filter(|light| light.id != object.id) {
            let to_light = light.position - self.point;
            let shadow = Ray::new(self.point, to_light)?;
            let terminus = shadow.nearest_sphere_intersect(spheres, &[object.id], 0, max_bounces, 0)?;

            // Anything else the shadow ray lands on occludes the light.
            if let Some(terminus) = terminus {
                if terminus.object.id == light.id {
                    let angle = self.normal.angle(&to_light)?;
                    illumination = illumination.add(&light.relative_strength(angle, to_light.len()));
                }
            }
        }

        Ok(background.add(&object.colour.illuminate(&illumination)))
    }
}

/// Closest of the hits; the earliest one wins a tie.
pub fn nearest_intersection<'a, I>(intersections: I) -> Option<Intersection<'a>>
where
    I: IntoIterator<Item = Option<Intersection<'a>>>,
{
    intersections
        .into_iter()
        .flatten()
        .fold(None, |nearest: Option<Intersection<'a>>, candidate| match nearest {
            Some(nearest) if nearest.distance <= candidate.distance => Some(nearest),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ObjectId;
    use crate::material::Material;

    const WHITE: Colour = Colour::new(255.0, 255.0, 255.0);

    fn sphere(id: u32, centre: Vec3<f64>, radius: f64, material: Material) -> Sphere {
        Sphere::new(ObjectId(id), centre, radius, material, Colour::new(200.0, 100.0, 50.0))
    }

    /// Shades whatever `ray` ends up on, or returns the background.
    fn trace(
        ray: &Ray,
        spheres: &[Sphere],
        directional: &[DirectionalLight],
        point: &[PointLight],
        max_bounces: u32,
    ) -> Colour {
        let background = Colour::new(1.0, 2.0, 3.0);
        match ray.nearest_sphere_intersect(spheres, &[], 0, max_bounces, 0).unwrap() {
            Some(terminus) => terminus
                .terminal_rgb(spheres, background, directional, point, max_bounces)
                .unwrap(),
            None => background,
        }
    }

    fn forward() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0)).unwrap()
    }

    #[test]
    fn nearest_skips_misses_and_keeps_first_tie() {
        let a = sphere(1, Vec3::default(), 1.0, Material::opaque(0.0));
        let b = sphere(2, Vec3::default(), 1.0, Material::opaque(0.0));
        let c = sphere(3, Vec3::default(), 1.0, Material::opaque(0.0));
        let point = Vec3::default();

        let nearest = nearest_intersection(vec![
            None,
            Some(Intersection::new(3.0, point, point, &a)),
            Some(Intersection::new(2.0, point, point, &b)),
            None,
            Some(Intersection::new(2.0, point, point, &c)),
        ])
        .unwrap();

        assert_eq!(ObjectId(2), nearest.object.id);
    }

    #[test]
    fn nearest_of_misses_is_none() {
        assert!(nearest_intersection(vec![None, None]).is_none());
        assert!(nearest_intersection(Vec::new()).is_none());
    }

    #[test]
    fn emission_only() {
        let spheres = [sphere(1, Vec3::default(), 1.0, Material::opaque(0.5))];

        let expected = Colour::new(1.0, 2.0, 3.0).add(&Colour::new(200.0, 100.0, 50.0).illuminate(
            &Colour::new(100.0, 50.0, 25.0),
        ));
        assert_eq!(expected, trace(&forward(), &spheres, &[], &[], 1));
    }

    #[test]
    fn directional_light_facing_surface() {
        let spheres = [sphere(1, Vec3::default(), 1.0, Material::opaque(0.0))];
        let sun = DirectionalLight {
            direction: Vec3::new(0.0, 0.0, -1.0),
            colour: WHITE,
        };

        let colour = trace(&forward(), &spheres, &[sun], &[], 1);
        assert_eq!(Colour::new(201.0, 102.0, 53.0), colour);
    }

    #[test]
    fn lone_mirror_shows_its_own_colour() {
        let spheres = [sphere(1, Vec3::default(), 1.0, Material::reflective(1.0))];

        let colour = trace(&forward(), &spheres, &[], &[], 1);
        let own = Colour::new(200.0, 100.0, 50.0);
        assert_eq!(Colour::new(1.0, 2.0, 3.0).add(&own.illuminate(&own)), colour);
    }

    #[test]
    fn lone_glass_sphere_shows_background() {
        let spheres = [sphere(1, Vec3::default(), 1.0, Material::transparent(1.0, 1.5))];

        assert_eq!(Colour::new(1.0, 2.0, 3.0), trace(&forward(), &spheres, &[], &[], 3));
    }

    fn lit_scene(blocker: bool) -> Vec<Sphere> {
        let mut spheres = vec![
            sphere(1, Vec3::default(), 1.0, Material::opaque(0.0)),
            // The light's own body, off to the camera side.
            sphere(9, Vec3::new(0.0, 0.0, -6.0), 0.5, Material::opaque(1.0)),
        ];
        if blocker {
            spheres.push(sphere(2, Vec3::new(0.0, 0.0, -3.0), 0.5, Material::opaque(0.0)));
        }
        spheres
    }

    fn bulb() -> PointLight {
        PointLight {
            id: ObjectId(9),
            position: Vec3::new(0.0, 0.0, -6.0),
            colour: WHITE,
            attenuation: 0.0,
        }
    }

    #[test]
    fn point_light_in_plain_sight() {
        let spheres = lit_scene(false);
        let surface = sphere(1, Vec3::default(), 1.0, Material::opaque(0.0));
        let hit = Intersection::new(9.0, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0), &surface);

        let colour = hit.terminal_rgb(&spheres, Colour::BLACK, &[], &[bulb()], 2).unwrap();
        assert_eq!(Colour::new(200.0, 100.0, 50.0), colour);
    }

    #[test]
    fn occluded_point_light_contributes_nothing() {
        let spheres = lit_scene(true);
        let surface = sphere(1, Vec3::default(), 1.0, Material::opaque(0.0));
        let hit = Intersection::new(9.0, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0), &surface);

        let colour = hit.terminal_rgb(&spheres, Colour::BLACK, &[], &[bulb()], 2).unwrap();
        assert_eq!(Colour::BLACK, colour);
    }

    #[test]
    fn light_does_not_illuminate_itself() {
        let spheres = lit_scene(false);
        let body = spheres[1];
        let hit = Intersection::new(1.0, Vec3::new(0.0, 0.0, -6.5), Vec3::new(0.0, 0.0, -1.0), &body);

        let colour = hit.terminal_rgb(&spheres, Colour::BLACK, &[], &[bulb()], 2).unwrap();
        assert_eq!(Colour::new(200.0, 100.0, 50.0).illuminate(&Colour::new(200.0, 100.0, 50.0)), colour);
    }

    #[test]
    fn light_at_hit_point_is_an_error() {
        let spheres = lit_scene(false);
        let surface = sphere(1, Vec3::default(), 1.0, Material::opaque(0.0));
        let mut light = bulb();
        light.position = Vec3::new(0.0, 0.0, -1.0);
        let hit = Intersection::new(9.0, light.position, Vec3::new(0.0, 0.0, -1.0), &surface);

        assert!(hit.terminal_rgb(&spheres, Colour::BLACK, &[], &[light], 2).is_err());
    }
}
