//! Recursive ray tracing over a scene of spheres.
//!
//! A ray is followed through mirror reflections and refraction inside transparent
//! spheres until it lands on an opaque surface, escapes, or runs out of bounces.
//! The surface it lands on is then shaded from directional lights and from point
//! lights visible along a shadow ray.

pub mod camera;
pub mod colour;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod light;
pub mod material;
pub mod matrix;
pub mod ray;
pub mod scene;
pub mod vec3;

pub use crate::error::{Error, Result};
pub use crate::intersection::Intersection;
