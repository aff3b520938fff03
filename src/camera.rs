use serde_derive::Deserialize;

use crate::error::Result;
use crate::matrix::Angle;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Size of the window the camera looks through, one unit in front of it.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0 }
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
pub struct Camera {
    pub origin: Vec3<f64>,
    #[serde(default)]
    pub orientation: Angle,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Camera {
    /// Ray through pixel `(x, y)` of a `width` x `height` image, `y` growing downwards.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Ray> {
        let sx = x as f64 - width as f64 / 2.0;
        let sy = height as f64 / 2.0 - y as f64;

        let vx = sx * self.viewport.width / width as f64;
        let vy = sy * self.viewport.height / height as f64;
        let vz = 1.0;

        Ray::new(self.origin, Vec3::new(vx, vy, vz).rotate(&self.orientation))
    }
}

#[test]
fn centre_pixel_looks_down_z() {
    let camera = Camera {
        origin: Vec3::new(1.0, 2.0, 3.0),
        ..Default::default()
    };

    let ray = camera.primary_ray(50, 50, 100, 100).unwrap();
    assert_eq!(Vec3::new(1.0, 2.0, 3.0), ray.origin());
    assert_eq!(Vec3::new(0.0, 0.0, 1.0), *ray.direction());
}

#[test]
fn top_left_pixel_looks_up_and_left() {
    let ray = Camera::default().primary_ray(0, 0, 100, 100).unwrap();

    assert!(ray.direction().x < 0.0);
    assert!(ray.direction().y > 0.0);
}

#[test]
fn orientation_turns_the_view() {
    let camera = Camera {
        orientation: Angle::new(0.0, std::f64::consts::FRAC_PI_2, 0.0),
        ..Default::default()
    };

    let ray = camera.primary_ray(50, 50, 100, 100).unwrap();
    assert!(ray.direction().z.abs() < 1e-12);
    assert!((ray.direction().x.abs() - 1.0).abs() < 1e-12);
}
