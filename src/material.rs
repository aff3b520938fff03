use serde_derive::Deserialize;

/// How a surface redirects the rays that hit it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    /// Diffuse, the ray stops here.
    Opaque,
    /// Mirror.
    Reflective,
    /// The ray is refracted through the body.
    Transparent,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "MaterialFlags")]
pub struct Material {
    pub surface: Surface,
    /// Fraction of the surface colour emitted regardless of lighting, in `[0, 1]`.
    pub emissive: f64,
    pub refractive_index: f64,
}

impl Material {
    pub fn opaque(emissive: f64) -> Self {
        Self { surface: Surface::Opaque, emissive, refractive_index: 1.0 }
    }

    pub fn reflective(emissive: f64) -> Self {
        Self { surface: Surface::Reflective, emissive, refractive_index: 1.0 }
    }

    pub fn transparent(emissive: f64, refractive_index: f64) -> Self {
        Self { surface: Surface::Transparent, emissive, refractive_index }
    }
}

/// Scene file representation. Reflective wins when both flags are set.
#[derive(Deserialize)]
struct MaterialFlags {
    #[serde(default)]
    reflective: bool,
    #[serde(default)]
    transparent: bool,
    #[serde(default)]
    emissive: f64,
    #[serde(default = "vacuum")]
    refractive_index: f64,
}

fn vacuum() -> f64 {
    1.0
}

impl From<MaterialFlags> for Material {
    fn from(flags: MaterialFlags) -> Self {
        let surface = match (flags.reflective, flags.transparent) {
            (true, _) => Surface::Reflective,
            (false, true) => Surface::Transparent,
            (false, false) => Surface::Opaque,
        };

        Material {
            surface,
            emissive: flags.emissive,
            refractive_index: flags.refractive_index,
        }
    }
}

#[test]
fn reflective_flag_takes_precedence() {
    let material: Material =
        serde_json::from_str(r#"{"reflective": true, "transparent": true, "refractive_index": 1.5}"#).unwrap();

    assert_eq!(Surface::Reflective, material.surface);
}

#[test]
fn flags_default_to_opaque_vacuum() {
    let material: Material = serde_json::from_str(r#"{"emissive": 0.25}"#).unwrap();

    assert_eq!(Material::opaque(0.25), material);
}

#[test]
fn transparent_keeps_index() {
    let material: Material = serde_json::from_str(r#"{"transparent": true, "refractive_index": 1.33}"#).unwrap();

    assert_eq!(Material::transparent(0.0, 1.33), material);
}
