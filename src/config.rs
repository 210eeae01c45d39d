//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit controls
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Scene description and assets
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    /// Info panel, buttons, and label
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORRERY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position [x, y, z]
    pub position: [f32; 3],
    /// Point the camera orbits
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-90.0, 140.0, 400.0],
            target: [0.0, 0.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100000.0,
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    /// Furthest the camera may dolly from its target
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: 1000.0,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// System description (RON); the built-in system is used if it cannot be read
    pub path: String,
    /// Directory texture names are resolved against
    pub texture_dir: String,
    /// Clear color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/solar_system.ron".to_string(),
            texture_dir: "assets/textures".to_string(),
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frame rate at which per-frame rotation rates are defined
    pub reference_fps: f32,
    /// Multiplier on animation speed
    pub time_scale: f32,
    /// Start paused
    pub paused: bool,
    /// Longest frame time fed to the animation, in seconds
    pub max_frame_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            reference_fps: 60.0,
            time_scale: 1.0,
            paused: false,
            max_frame_time: 0.1,
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Allow music at all
    pub enabled: bool,
    pub music_path: String,
    /// Volume in [0, 1]
    pub volume: f32,
    /// Start playing on launch
    pub autoplay: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_path: "assets/audio/background.mp3".to_string(),
            volume: 0.5,
            autoplay: false,
        }
    }
}

/// Info panel and button configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel text while no body is highlighted
    pub overview_text: String,
    /// Panel text while Earth is highlighted
    pub focus_text: String,
    pub highlight_button: String,
    pub music_button: String,
    /// Text drawn next to the highlighted body
    pub label_text: String,
    pub show_label: bool,
    pub font_size: f32,
    pub label_font_size: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            overview_text: "The Solar System\n\nThe Sun and nine bodies on their orbits. \
                Drag to rotate, scroll to zoom, right-drag to pan."
                .to_string(),
            focus_text: "Earth\n\nThird planet from the Sun and the only known world with \
                liquid surface water. One orbit takes 365.25 days; one rotation about 24 hours."
                .to_string(),
            highlight_button: "Highlight Earth".to_string(),
            music_button: "Music".to_string(),
            label_text: "Earth".to_string(),
            show_label: true,
            font_size: 16.0,
            label_font_size: 14.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Run the system validator after loading the scene
    pub validate_scene: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            validate_scene: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.camera.position, [-90.0, 140.0, 400.0]);
        assert_eq!(config.controls.max_distance, 1000.0);
        assert_eq!(config.animation.reference_fps, 60.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("music_path"));
        assert!(toml.contains("overview_text"));
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config: AppConfig = toml::from_str("[window]\ntitle = \"Custom\"\n").unwrap();
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.audio.volume, 0.5);
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
        assert_eq!(config.scene.path, "scenes/solar_system.ron");
    }
}
