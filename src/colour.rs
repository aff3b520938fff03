use image::Rgb;
use serde_derive::Deserialize;

/// Linear RGB on a 0..255 scale. Channels may exceed 255 while light is accumulated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Colour {
        Colour::new(self.r * factor, self.g * factor, self.b * factor)
    }

    #[inline]
    pub fn add(&self, other: &Colour) -> Colour {
        Colour::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    /// Surface colour lit by `light`, where a light channel of 255 passes the surface
    /// channel through unchanged.
    #[inline]
    pub fn illuminate(&self, light: &Colour) -> Colour {
        Colour::new(
            self.r * light.r / 255.0,
            self.g * light.g / 255.0,
            self.b * light.b / 255.0,
        )
    }

    pub fn to_rgb(&self) -> Rgb<u8> {
        let channel = |c: f64| c.round().max(0.0).min(255.0) as u8;
        Rgb([channel(self.r), channel(self.g), channel(self.b)])
    }
}

impl From<[f64; 3]> for Colour {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Colour::new(r, g, b)
    }
}

#[test]
fn illuminate_with_full_white_is_identity() {
    let c = Colour::new(10.0, 128.0, 255.0);
    assert_eq!(c, c.illuminate(&Colour::new(255.0, 255.0, 255.0)));
    assert_eq!(Colour::BLACK, c.illuminate(&Colour::BLACK));
}

#[test]
fn to_rgb_clamps() {
    let c = Colour::new(-4.0, 127.6, 900.0);
    assert_eq!(Rgb([0, 128, 255]), c.to_rgb());
}

#[test]
fn deserialize_from_triple() {
    let c: Colour = serde_json::from_str("[1, 2.5, 3]").unwrap();
    assert_eq!(Colour::new(1.0, 2.5, 3.0), c);
}
