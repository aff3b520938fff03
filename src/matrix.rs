use std::ops::{Add, Mul};

use serde_derive::Deserialize;

use crate::vec3::Vec3;

/// Euler-like rotation, in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct Angle {
    /// Rotation in the xy plane.
    pub x: f64,
    /// Rotation around the y axis, positive is left.
    pub y: f64,
    /// Bank, positive is left.
    pub z: f64,
}

impl Angle {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Angle {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Angle::new(x, y, z)
    }
}

///
/// Index notation is: i, j - row, column.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Matrix3x3<T>([[T; 3]; 3]);

impl<T: Copy> Matrix3x3<T> {
    pub fn new(v: [[T; 3]; 3]) -> Self {
        Matrix3x3(v)
    }
}

impl Matrix3x3<f64> {
    /// Intrinsic z-y-z composition of `angle`, meant to be applied to row vectors.
    pub fn rotation(angle: &Angle) -> Self {
        let (sa, ca) = angle.x.sin_cos();
        let (sb, cb) = angle.y.sin_cos();
        let (sc, cc) = angle.z.sin_cos();

        Matrix3x3::new([
            [cc * cb * ca - sc * sa, cc * cb * sa + sc * ca, -cc * sb],
            [-sc * cb * ca - cc * sa, -sc * cb * sa + cc * ca, sc * sb],
            [sb * ca, sb * sa, cb],
        ])
    }
}

/// Row vector times matrix.
impl<T: Copy + Add<Output = T> + Mul<Output = T>> Mul<Matrix3x3<T>> for Vec3<T> {
    type Output = Vec3<T>;

    fn mul(self, m: Matrix3x3<T>) -> Self::Output {
        let m = m.0;
        Vec3::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        )
    }
}

#[cfg(test)]
impl Matrix3x3<f64> {
    fn identity() -> Self {
        Matrix3x3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }
}

#[cfg(test)]
impl Mul<Matrix3x3<f64>> for Matrix3x3<f64> {
    type Output = Matrix3x3<f64>;

    fn mul(self, o: Matrix3x3<f64>) -> Self::Output {
        let mut out = Matrix3x3::<f64>::default();

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    out.0[i][j] += self.0[i][k] * o.0[k][j];
                }
            }
        }

        out
    }
}

#[test]
fn mul_vec_matrix() {
    let matrix = Matrix3x3::new([[1, 0, 0], [0, 2, 0], [3, 0, 1]]);
    let vec = Vec3::new(10, 10, 10);

    assert_eq!(Vec3::new(40, 20, 10), vec * matrix);
}

#[test]
fn rotation_by_zero_is_identity() {
    assert_eq!(Matrix3x3::identity(), Matrix3x3::rotation(&Angle::default()));
}

#[test]
fn quarter_turn_in_xy_plane() {
    let angle = Angle::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
    let rotated = Vec3::new(1.0, 0.0, 0.0).rotate(&angle);

    assert!((rotated - Vec3::new(0.0, 1.0, 0.0)).len() < 1e-12);
}

#[test]
fn rotation_preserves_length() {
    let angle = Angle::new(0.3, -1.1, 2.4);
    let v = Vec3::new(1.0, -2.0, 0.5);

    assert!((v.rotate(&angle).len() - v.len()).abs() < 1e-12);
}

#[test]
fn rotation_composes_with_inverse() {
    let r = Matrix3x3::rotation(&Angle::new(0.7, 0.2, -0.4));
    let t = Matrix3x3::new([
        [r.0[0][0], r.0[1][0], r.0[2][0]],
        [r.0[0][1], r.0[1][1], r.0[2][1]],
        [r.0[0][2], r.0[1][2], r.0[2][2]],
    ]);

    let product = r * t;
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((product.0[i][j] - expected).abs() < 1e-12);
        }
    }
}
