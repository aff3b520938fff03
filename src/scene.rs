use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};
use serde_derive::Deserialize;

use crate::camera::Camera;
use crate::colour::Colour;
use crate::error::{Error, Result};
use crate::geometry::Sphere;
use crate::light::{DirectionalLight, PointLight};
use crate::ray::Ray;

fn default_depth() -> u32 {
    2
}

fn default_background() -> Colour {
    Colour::new(30.0, 30.0, 30.0)
}

/// Everything a render reads. Immutable once loaded, so rays can be traced from many threads.
#[derive(Clone, Debug, Deserialize)]
pub struct Scene {
    #[serde(default = "default_background")]
    pub background: Colour,
    #[serde(default = "default_depth")]
    pub max_bounces: u32,
    #[serde(default)]
    pub camera: Camera,
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub directional_lights: Vec<DirectionalLight>,
    #[serde(default)]
    pub point_lights: Vec<PointLight>,
}

impl Scene {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let scene = Self::from_reader(BufReader::new(file))?;

        info!(
            "loaded {:?}: {} spheres, {} directional and {} point lights",
            path.as_ref(),
            scene.spheres.len(),
            scene.directional_lights.len(),
            scene.point_lights.len()
        );

        Ok(scene)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let scene: Scene = serde_json::from_reader(reader)?;
        scene.validate()?;

        Ok(scene)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for sphere in &self.spheres {
            if !(sphere.radius > 0.0) {
                return Err(Error::NonPositiveRadius(sphere.id));
            }
            if !ids.insert(sphere.id) {
                return Err(Error::DuplicateId(sphere.id));
            }
        }

        for light in self.unmatched_point_lights() {
            warn!("point light {} has no sphere and will never illuminate anything", light.id);
        }

        Ok(())
    }

    /// Point lights with no sphere of the same id. Shadow rays can never reach them.
    pub fn unmatched_point_lights(&self) -> impl Iterator<Item = &PointLight> + '_ {
        self.point_lights
            .iter()
            .filter(move |light| !self.spheres.iter().any(|sphere| sphere.id == light.id))
    }

    /// Colour seen along `ray`.
    pub fn trace(&self, ray: &Ray) -> Result<Colour> {
        let terminus = ray.nearest_sphere_intersect(&self.spheres, &[], 0, self.max_bounces, 0)?;

        match terminus {
            Some(terminus) => terminus.terminal_rgb(
                &self.spheres,
                self.background,
                &self.directional_lights,
                &self.point_lights,
                self.max_bounces,
            ),
            None => Ok(self.background),
        }
    }
}
