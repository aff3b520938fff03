use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde_derive::Deserialize;

use crate::error::{Error, Result};
use crate::matrix::{Angle, Matrix3x3};

#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[T; 3]")]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec3<T> {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn dot(&self, other: &Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Copy + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vec3<f64> {
    #[inline]
    pub fn len(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector pointing the same way.
    ///
    /// Fails with [`Error::ZeroLength`] for the zero vector.
    #[inline]
    pub fn unit(&self) -> Result<Vec3<f64>> {
        let len = self.len();
        if len == 0.0 {
            return Err(Error::ZeroLength);
        }

        Ok(Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        })
    }

    #[inline]
    pub fn inverse(&self) -> Vec3<f64> {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Negates in place and hands `self` back for chaining.
    #[inline]
    pub fn invert(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    #[inline]
    pub fn distance(&self, other: &Vec3<f64>) -> f64 {
        (*other - *self).len()
    }

    /// Angle to `other` in radians, in `[0, π]`.
    pub fn angle(&self, other: &Vec3<f64>) -> Result<f64> {
        let denominator = self.len() * other.len();
        if denominator == 0.0 {
            return Err(Error::DegenerateAngle);
        }

        // Rounding can push parallel vectors just outside acos' domain.
        Ok((self.dot(other) / denominator).max(-1.0).min(1.0).acos())
    }

    /// Mirrors `self` about `normal`. Neither operand has to be a unit vector.
    pub fn reflect(&self, normal: &Vec3<f64>) -> Result<Vec3<f64>> {
        let v = self.unit()?;
        let n = normal.unit()?;

        (v - n.scale(2.0 * v.dot(&n))).unit()
    }

    /// Bends `self` through a boundary with the given `normal` going from a medium with
    /// refractive index `from` into one with index `to`.
    ///
    /// Returns `None` on total internal reflection.
    pub fn refract(&self, normal: &Vec3<f64>, from: f64, to: f64) -> Result<Option<Vec3<f64>>> {
        let v = self.unit()?;
        let n = normal.unit()?;

        let eta = from / to;
        let mut cos_i = v.dot(&n).max(-1.0).min(1.0);
        if cos_i < 0.0 {
            cos_i = -cos_i;
        }

        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k < 0.0 {
            return Ok(None);
        }

        let refracted = v.scale(eta) + n.scale(eta * cos_i - k.sqrt());
        refracted.unit().map(Some)
    }

    #[inline]
    pub fn rotate(&self, angle: &Angle) -> Vec3<f64> {
        *self * Matrix3x3::rotation(angle)
    }
}

impl<T> From<[T; 3]> for Vec3<T> {
    #[inline]
    fn from([x, y, z]: [T; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn add(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn sub(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Vec3<f64> {
    type Output = Vec3<f64>;

    #[inline]
    fn mul(self, factor: f64) -> Self::Output {
        self.scale(factor)
    }
}

impl<T: Copy + AddAssign> AddAssign for Vec3<T> {
    #[inline]
    fn add_assign(&mut self, other: Vec3<T>) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl<T: Copy + SubAssign> SubAssign for Vec3<T> {
    #[inline]
    fn sub_assign(&mut self, other: Vec3<T>) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl<T: Copy + MulAssign> MulAssign<T> for Vec3<T> {
    #[inline]
    fn mul_assign(&mut self, factor: T) {
        self.x *= factor;
        self.y *= factor;
        self.z *= factor;
    }
}

#[cfg(test)]
fn assert_close(expected: Vec3<f64>, actual: Vec3<f64>) {
    assert!(
        (expected - actual).len() < 1e-9,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn unit_has_length_one() {
    for v in &[
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-1.0, 2.0, -7.5),
        Vec3::new(1e-3, 0.0, 1e-3),
    ] {
        assert!((v.unit().unwrap().len() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn unit_of_zero_vector_fails() {
    assert!(matches!(Vec3::new(0.0, 0.0, 0.0).unit(), Err(Error::ZeroLength)));
}

#[test]
fn angle_with_zero_vector_fails() {
    let v = Vec3::new(1.0, 0.0, 0.0);
    assert!(matches!(v.angle(&Vec3::default()), Err(Error::DegenerateAngle)));
}

#[test]
fn angle_between_axes() {
    let x = Vec3::new(2.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 5.0, 0.0);

    assert!((x.angle(&y).unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(x.angle(&x).unwrap().abs() < 1e-12);
    assert!((x.angle(&x.inverse()).unwrap() - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn cross_of_axes() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(Vec3::new(0.0, 0.0, 1.0), x.cross(&y));
    assert_eq!(Vec3::new(0.0, 0.0, -1.0), y.cross(&x));
}

#[test]
fn distance_is_euclidean() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 6.0, 3.0);

    assert_eq!(5.0, a.distance(&b));
    assert_eq!(5.0, b.distance(&a));
}

#[test]
fn in_place_ops() {
    let mut v = Vec3::new(1.0, 2.0, 3.0);
    v += Vec3::new(1.0, 1.0, 1.0);
    v *= 2.0;
    v -= Vec3::new(4.0, 0.0, 0.0);
    v.invert();

    assert_eq!(Vec3::new(0.0, -6.0, -8.0), v);
}

#[test]
fn reflect_off_parallel_normal_negates() {
    for v in &[Vec3::new(0.0, 0.0, 2.0), Vec3::new(1.0, -3.0, 0.5)] {
        assert_close(v.inverse().unit().unwrap(), v.reflect(v).unwrap());
    }
}

#[test]
fn reflect_off_floor() {
    let v = Vec3::new(1.0, -1.0, 0.0);
    let floor = Vec3::new(0.0, 3.0, 0.0);

    assert_close(Vec3::new(1.0, 1.0, 0.0).unit().unwrap(), v.reflect(&floor).unwrap());
}

#[test]
fn refract_between_equal_media_keeps_direction() {
    let v = Vec3::new(0.3, -1.0, 0.2);
    let normal = Vec3::new(0.0, 1.0, 0.0);

    let refracted = v.refract(&normal, 1.5, 1.5).unwrap().unwrap();
    assert_close(v.unit().unwrap(), refracted);
}

#[test]
fn refract_bends_towards_normal_in_denser_medium() {
    let v = Vec3::new(1.0, -1.0, 0.0);
    let normal = Vec3::new(0.0, 1.0, 0.0);

    let refracted = v.refract(&normal, 1.0, 1.5).unwrap().unwrap();
    let incidence = v.angle(&normal.inverse()).unwrap();
    let transmission = refracted.angle(&normal.inverse()).unwrap();

    assert!(transmission < incidence);
    // Snell: sin(i) = 1.5 * sin(t).
    assert!((incidence.sin() - 1.5 * transmission.sin()).abs() < 1e-9);
}

#[test]
fn refract_past_critical_angle_is_total_internal_reflection() {
    let grazing = Vec3::new(1.0, -0.1, 0.0);
    let normal = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(None, grazing.refract(&normal, 1.5, 1.0).unwrap());
}

#[test]
fn rotate_by_zero_angle_is_identity() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_close(v, v.rotate(&Angle::default()));
}
