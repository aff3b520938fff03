use log::debug;

use crate::error::Result;
use crate::geometry::{ObjectId, Sphere};
use crate::intersection::{nearest_intersection, Intersection};
use crate::material::Surface;
use crate::vec3::Vec3;

/// Give up on a ray bouncing around inside a transparent sphere after this many
/// total internal reflections.
pub const MAX_INTERNAL_REFLECTIONS: usize = 10;

/// Refractive index outside of every sphere.
const VACUUM: f64 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3<f64>,
    direction: Vec3<f64>,
}

impl Ray {
    /// Fails if `direction` is the zero vector.
    pub fn new(origin: Vec3<f64>, direction: Vec3<f64>) -> Result<Self> {
        Ok(Self {
            origin,
            direction: direction.unit()?,
        })
    }

    #[inline]
    pub fn origin(&self) -> Vec3<f64> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3<f64> {
        &self.direction
    }

    #[inline]
    pub fn offset(&self, t: f64) -> Vec3<f64> {
        self.origin + self.direction.scale(t)
    }

    /// Follows the ray through reflections and refractions and returns the intersection
    /// it finally comes to rest on, if any.
    ///
    /// Spheres whose id is in `suppress` are not tested. `bounces` counts the secondary
    /// rays cast so far and nothing is returned once it exceeds `max_bounces`.
    /// `through_count` counts the transparent bodies passed and is recorded on the terminus.
    pub fn nearest_sphere_intersect<'s>(
        &self,
        spheres: &'s [Sphere],
        suppress: &[ObjectId],
        bounces: u32,
        max_bounces: u32,
        through_count: u32,
    ) -> Result<Option<Intersection<'s>>> {
        let candidates = spheres
            .iter()
            .filter(|sphere| !suppress.contains(&sphere.id))
            .map(|sphere| sphere.intersection(self));

        let mut hit = match nearest_intersection(candidates) {
            Some(hit) => hit,
            None => return Ok(None),
        };

        if bounces > max_bounces {
            return Ok(None);
        }

        hit.bounces = bounces;
        hit.through_count = through_count;

        // A secondary ray cast at the ceiling could only resolve to nothing,
        // so it is not cast at all.
        let exhausted = bounces >= max_bounces;
        let id = hit.object.id;

        match hit.object.material.surface {
            Surface::Reflective => {
                if exhausted {
                    debug!("bounce limit {} reached on mirror {}", max_bounces, id);
                    return Ok(Some(hit));
                }

                let reflected = Ray::new(hit.point, self.direction.reflect(&hit.normal)?)?;
                let terminus =
                    reflected.nearest_sphere_intersect(spheres, &[id], bounces + 1, max_bounces, through_count)?;

                // A mirror reflecting nothing shows its own colour.
                Ok(terminus.or(Some(hit)))
            }
            Surface::Transparent => {
                if exhausted {
                    debug!("bounce limit {} reached inside {}", max_bounces, id);
                    return Ok(None);
                }

                match self.sphere_exit_ray(&hit)? {
                    Some(exit) => {
                        exit.nearest_sphere_intersect(spheres, &[id], bounces + 1, max_bounces, through_count + 1)
                    }
                    None => Ok(None),
                }
            }
            Surface::Opaque => Ok(Some(hit)),
        }
    }

    /// Refracts the ray through the sphere it entered at `entry` and returns the ray
    /// leaving the far side.
    ///
    /// Returns `None` when the ray is trapped inside the sphere.
    pub fn sphere_exit_ray(&self, entry: &Intersection<'_>) -> Result<Option<Ray>> {
        let sphere = entry.object;
        let index = sphere.material.refractive_index;

        let inside = match self.direction.refract(&entry.normal, VACUUM, index)? {
            Some(direction) => direction,
            None => {
                debug!("ray grazes {} and never enters it", sphere.id);
                return Ok(None);
            }
        };

        let mut internal = Ray::new(entry.point, inside)?;
        for _ in 0..MAX_INTERNAL_REFLECTIONS {
            let exit = match sphere.intersection(&internal) {
                Some(exit) => exit,
                None => {
                    debug!("internal ray failed to reach the surface of {}", sphere.id);
                    return Ok(None);
                }
            };

            match internal.direction.refract(&exit.normal.inverse(), index, VACUUM)? {
                Some(direction) => return Ray::new(exit.point, direction).map(Some),
                None => {
                    let reflected = internal.direction.reflect(&exit.normal)?;
                    internal = Ray::new(exit.point, reflected)?;
                }
            }
        }

        debug!(
            "ray trapped in {} after {} internal reflections",
            sphere.id, MAX_INTERNAL_REFLECTIONS
        );
        Ok(None)
    }
}
