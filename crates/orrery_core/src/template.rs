//! Declarative description of the solar system
//!
//! A [`SystemTemplate`] is loaded from a RON file and turned into a live scene
//! graph by [`SolarSystem::build`](crate::SolarSystem::build).

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

/// The backdrop sphere surrounding everything
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarFieldTemplate {
    pub radius: f32,
    pub segments: u32,
    pub texture: String,
}

/// The central star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTemplate {
    pub radius: f32,
    pub segments: u32,
    pub texture: String,
    /// Self-rotation per reference frame, radians
    pub spin: f32,
}

/// A ring around a body, in the body's orbital plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingTemplate {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: String,
    #[serde(default = "RingTemplate::default_segments")]
    pub segments: u32,
}

impl RingTemplate {
    fn default_segments() -> u32 {
        32
    }
}

/// One orbiting body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    pub radius: f32,
    /// Distance from the sun along the pivot's +X axis
    pub distance: f32,
    pub texture: String,
    /// Self-rotation per reference frame, radians
    pub spin: f32,
    /// Pivot rotation per reference frame, radians
    pub orbit: f32,
    #[serde(default)]
    pub ring: Option<RingTemplate>,
}

impl BodyTemplate {
    fn new(name: &str, radius: f32, distance: f32, spin: f32, orbit: f32) -> Self {
        Self {
            name: name.to_string(),
            radius,
            distance,
            texture: format!("{}.jpg", name.to_lowercase()),
            spin,
            orbit,
            ring: None,
        }
    }

    fn with_ring(mut self, inner_radius: f32, outer_radius: f32) -> Self {
        self.ring = Some(RingTemplate {
            inner_radius,
            outer_radius,
            texture: format!("{}_ring.png", self.name.to_lowercase()),
            segments: RingTemplate::default_segments(),
        });
        self
    }
}

/// Lighting shared by all lit bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingTemplate {
    /// Ambient color as `0xRRGGBB`
    pub ambient: u32,
    /// Point light color as `0xRRGGBB`
    pub point_color: u32,
    pub point_intensity: f32,
    /// Distance at which the point light fades to zero
    pub point_range: f32,
    pub point_position: [f32; 3],
}

impl Default for LightingTemplate {
    fn default() -> Self {
        Self {
            ambient: 0x333333,
            point_color: 0xffffff,
            point_intensity: 2.5,
            point_range: 300.0,
            point_position: [0.0, 0.0, 0.0],
        }
    }
}

/// Complete system description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTemplate {
    pub name: String,
    pub star_field: StarFieldTemplate,
    pub sun: SunTemplate,
    #[serde(default)]
    pub lighting: LightingTemplate,
    /// Sphere segments used for every body
    #[serde(default = "SystemTemplate::default_body_segments")]
    pub body_segments: u32,
    pub bodies: Vec<BodyTemplate>,
    /// Name of the body the highlight button acts on
    pub highlight_target: String,
}

impl SystemTemplate {
    fn default_body_segments() -> u32 {
        30
    }

    /// The built-in nine-body system
    pub fn default_system() -> Self {
        Self {
            name: "Solar System".to_string(),
            star_field: StarFieldTemplate {
                radius: 1000.0,
                segments: 100,
                texture: "stars.jpg".to_string(),
            },
            sun: SunTemplate {
                radius: 16.0,
                segments: 30,
                texture: "sun.jpg".to_string(),
                spin: 0.004,
            },
            lighting: LightingTemplate::default(),
            body_segments: Self::default_body_segments(),
            bodies: vec![
                BodyTemplate::new("Mercury", 3.2, 28.0, 0.004, 0.04),
                BodyTemplate::new("Venus", 5.8, 44.0, 0.002, 0.015),
                BodyTemplate::new("Earth", 6.0, 62.0, 0.02, 0.01),
                BodyTemplate::new("Mars", 4.0, 78.0, 0.018, 0.008),
                BodyTemplate::new("Jupiter", 12.0, 100.0, 0.04, 0.002),
                BodyTemplate::new("Saturn", 10.0, 138.0, 0.038, 0.0009).with_ring(10.0, 20.0),
                BodyTemplate::new("Uranus", 7.0, 176.0, 0.03, 0.0004).with_ring(7.0, 12.0),
                BodyTemplate::new("Neptune", 7.0, 200.0, 0.032, 0.0001),
                BodyTemplate::new("Pluto", 2.8, 216.0, 0.008, 0.00007),
            ],
            highlight_target: "Earth".to_string(),
        }
    }

    /// Look up a body by name
    pub fn body(&self, name: &str) -> Option<&BodyTemplate> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Load a system description from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let template = ron::from_str(&contents)?;
        Ok(template)
    }

    /// Save a system description to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for SystemTemplate {
    fn default() -> Self {
        Self::default_system()
    }
}

/// Error loading a system description
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a system description
#[derive(Debug)]
pub enum SceneSaveError {
    Io(io::Error),
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_system_bodies() {
        let system = SystemTemplate::default_system();
        assert_eq!(system.bodies.len(), 9);
        assert_eq!(system.highlight_target, "Earth");

        let earth = system.body("Earth").unwrap();
        assert_eq!(earth.radius, 6.0);
        assert_eq!(earth.distance, 62.0);
        assert_eq!(earth.texture, "earth.jpg");

        let ringed: Vec<_> = system
            .bodies
            .iter()
            .filter(|b| b.ring.is_some())
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(ringed, vec!["Saturn", "Uranus"]);
    }

    #[test]
    fn test_ring_texture_naming() {
        let system = SystemTemplate::default_system();
        let ring = system.body("Saturn").unwrap().ring.as_ref().unwrap();
        assert_eq!(ring.texture, "saturn_ring.png");
        assert_eq!(ring.segments, 32);
        assert_eq!((ring.inner_radius, ring.outer_radius), (10.0, 20.0));
    }

    #[test]
    fn test_distances_increase() {
        let system = SystemTemplate::default_system();
        for pair in system.bodies.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
    }

    #[test]
    fn test_ron_roundtrip() {
        let system = SystemTemplate::default_system();
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let text = ron::ser::to_string_pretty(&system, pretty).unwrap();
        let parsed: SystemTemplate = ron::from_str(&text).unwrap();
        assert_eq!(parsed, system);
    }

    #[test]
    fn test_ron_defaults_for_optional_fields() {
        let text = r#"(
            name: "Tiny",
            star_field: (radius: 500.0, segments: 16, texture: "stars.jpg"),
            sun: (radius: 4.0, segments: 8, texture: "sun.jpg", spin: 0.01),
            bodies: [
                (name: "Rock", radius: 1.0, distance: 10.0, texture: "rock.jpg", spin: 0.1, orbit: 0.01),
            ],
            highlight_target: "Rock",
        )"#;
        let parsed: SystemTemplate = ron::from_str(text).unwrap();
        assert_eq!(parsed.body_segments, 30);
        assert_eq!(parsed.lighting, LightingTemplate::default());
        assert!(parsed.bodies[0].ring.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = SystemTemplate::load("/nonexistent/system.ron");
        assert!(matches!(result, Err(SceneLoadError::Io(_))));
    }

    #[test]
    fn test_load_invalid_ron() {
        let path = std::env::temp_dir().join("orrery_invalid_system.ron");
        fs::write(&path, "( name: ").unwrap();
        let result = SystemTemplate::load(&path);
        assert!(matches!(result, Err(SceneLoadError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("orrery_saved_system.ron");
        let system = SystemTemplate::default_system();
        system.save(&path).unwrap();
        let loaded = SystemTemplate::load(&path).unwrap();
        assert_eq!(loaded, system);
        let _ = fs::remove_file(&path);
    }
}
