//! Materials and mesh shapes

use serde::{Serialize, Deserialize};

/// How a surface responds to scene lights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Texture color as-is, lights ignored (backdrop, sun, rings)
    Unlit,
    /// Ambient + point-light diffuse, plus emissive
    #[default]
    Lit,
}

/// Which faces are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    /// Inside faces only; used for the star-field sphere around the camera
    Back,
    Double,
}

/// Visual properties of a mesh
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Texture file name, resolved against the configured texture directory
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub shading: Shading,
    #[serde(default)]
    pub side: Side,
    /// Multiplied with the texture (white keeps the texture unchanged)
    #[serde(default = "Material::default_base_color")]
    pub base_color: [f32; 4],
    /// Emissive RGB, added on top of lighting
    #[serde(default)]
    pub emissive: [f32; 3],
    #[serde(default)]
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            shading: Shading::Lit,
            side: Side::Front,
            base_color: Self::default_base_color(),
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
        }
    }
}

impl Material {
    fn default_base_color() -> [f32; 4] {
        [1.0, 1.0, 1.0, 1.0]
    }

    /// Unlit textured material
    pub fn unlit(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            shading: Shading::Unlit,
            ..Self::default()
        }
    }

    /// Lit textured material
    pub fn lit(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            shading: Shading::Lit,
            ..Self::default()
        }
    }

    /// Builder: set which faces are drawn
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// Geometry attached to a mesh node
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeshShape {
    /// UV sphere with `segments` rings and `segments` slices
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane
    Ring { inner_radius: f32, outer_radius: f32, segments: u32 },
}

/// Convert a `0xRRGGBB` color to linear-ish RGB floats in `[0, 1]`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb(0xffff00), [1.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb(0x000000), [0.0, 0.0, 0.0]);
        let ambient = hex_to_rgb(0x333333);
        assert!((ambient[0] - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_constructors() {
        let sun = Material::unlit("sun.jpg");
        assert_eq!(sun.shading, Shading::Unlit);
        assert_eq!(sun.texture.as_deref(), Some("sun.jpg"));

        let stars = Material::unlit("stars.jpg").with_side(Side::Back);
        assert_eq!(stars.side, Side::Back);

        let earth = Material::lit("earth.jpg");
        assert_eq!(earth.shading, Shading::Lit);
        assert_eq!(earth.emissive_intensity, 0.0);
    }
}
