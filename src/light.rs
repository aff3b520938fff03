use serde_derive::Deserialize;

use crate::colour::Colour;
use crate::geometry::ObjectId;
use crate::vec3::Vec3;

/// Light arriving from infinitely far away, e.g. the sun.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct DirectionalLight {
    /// Points from the scene towards the light.
    pub direction: Vec3<f64>,
    pub colour: Colour,
}

impl DirectionalLight {
    /// Contribution to a surface whose normal makes `angle` radians with the light direction.
    pub fn relative_strength(&self, angle: f64) -> Colour {
        self.colour.scale(angle.cos().max(0.0))
    }
}

/// Light emitted from a single position.
///
/// A point light is visible only when a shadow ray reaches the sphere carrying the same `id`,
/// so every point light should have a matching sphere in the scene.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct PointLight {
    pub id: ObjectId,
    pub position: Vec3<f64>,
    pub colour: Colour,
    /// Quadratic falloff coefficient, zero disables falloff.
    #[serde(default)]
    pub attenuation: f64,
}

impl PointLight {
    pub fn relative_strength(&self, angle: f64, distance: f64) -> Colour {
        let falloff = 1.0 + self.attenuation * distance * distance;
        self.colour.scale(angle.cos().max(0.0) / falloff)
    }
}

#[test]
fn directional_light_behind_surface_contributes_nothing() {
    let light = DirectionalLight {
        direction: Vec3::new(0.0, 1.0, 0.0),
        colour: Colour::new(255.0, 255.0, 255.0),
    };

    assert_eq!(Colour::new(255.0, 255.0, 255.0), light.relative_strength(0.0));
    assert_eq!(Colour::BLACK, light.relative_strength(std::f64::consts::PI));
}

#[test]
fn point_light_falls_off_with_distance() {
    let light = PointLight {
        id: ObjectId(7),
        position: Vec3::default(),
        colour: Colour::new(200.0, 100.0, 0.0),
        attenuation: 0.25,
    };

    assert_eq!(Colour::new(200.0, 100.0, 0.0), light.relative_strength(0.0, 0.0));
    assert_eq!(Colour::new(100.0, 50.0, 0.0), light.relative_strength(0.0, 2.0));
}
