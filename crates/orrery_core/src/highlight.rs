//! Display mode: overview vs. a highlighted body
//!
//! Exactly one mode is active. Toggling flips the highlight target's emissive
//! glow and switches which text the info panel shows.

use crate::material::hex_to_rgb;
use crate::scene_graph::{NodeKey, SceneGraph};

/// Which of the two display states is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Overview,
    EarthFocus,
}

impl DisplayMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Overview => DisplayMode::EarthFocus,
            DisplayMode::EarthFocus => DisplayMode::Overview,
        }
    }

    pub fn is_highlighted(self) -> bool {
        self == DisplayMode::EarthFocus
    }
}

/// Emissive glow applied to the highlight target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Glow {
    pub const OFF: Self = Self { color: [0.0; 3], intensity: 0.0 };

    /// Yellow at half intensity
    pub fn yellow() -> Self {
        Self { color: hex_to_rgb(0xffff00), intensity: 0.5 }
    }
}

/// Highlight state bound to one mesh node
#[derive(Clone, Debug)]
pub struct Highlight {
    mode: DisplayMode,
    target: Option<NodeKey>,
    glow: Glow,
}

impl Highlight {
    /// Create an inactive highlight for `target`
    ///
    /// A `None` target still switches modes and panel text, it just has
    /// nothing to light up.
    pub fn new(target: Option<NodeKey>) -> Self {
        Self {
            mode: DisplayMode::Overview,
            target,
            glow: Glow::yellow(),
        }
    }

    /// Builder: override the glow used when highlighted
    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = glow;
        self
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_highlighted()
    }

    /// Flip the display mode and apply the matching emissive to the target
    pub fn toggle(&mut self, graph: &mut SceneGraph) -> DisplayMode {
        self.mode = self.mode.toggled();
        let glow = if self.mode.is_highlighted() { self.glow } else { Glow::OFF };

        if let Some(target) = self.target {
            if !graph.set_emissive(target, glow.color, glow.intensity) {
                log::warn!("Highlight target is not a mesh node; only the panel text changes");
            }
        }
        log::info!("Display mode: {:?}", self.mode);
        self.mode
    }
}

/// The two panel texts, one per display mode
#[derive(Clone, Debug, PartialEq)]
pub struct InfoPanel {
    overview: String,
    focus: String,
}

impl InfoPanel {
    pub fn new(overview: impl Into<String>, focus: impl Into<String>) -> Self {
        Self {
            overview: overview.into(),
            focus: focus.into(),
        }
    }

    /// Text for the given mode
    pub fn text(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Overview => &self.overview,
            DisplayMode::EarthFocus => &self.focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, MeshShape};
    use crate::scene_graph::NodeKind;
    use crate::transform::Transform;

    fn graph_with_earth() -> (SceneGraph, NodeKey) {
        let mut graph = SceneGraph::new();
        let earth = graph.add_root(
            "Earth",
            Transform::identity(),
            NodeKind::Mesh {
                mesh: MeshShape::Sphere { radius: 6.0, segments: 30 },
                material: Material::lit("earth.jpg"),
            },
        );
        (graph, earth)
    }

    fn emissive(graph: &SceneGraph, key: NodeKey) -> ([f32; 3], f32) {
        let m = graph.get(key).unwrap().material().unwrap();
        (m.emissive, m.emissive_intensity)
    }

    #[test]
    fn test_toggle_on_sets_yellow_glow() {
        let (mut graph, earth) = graph_with_earth();
        let mut highlight = Highlight::new(Some(earth));

        assert_eq!(highlight.toggle(&mut graph), DisplayMode::EarthFocus);
        assert_eq!(emissive(&graph, earth), ([1.0, 1.0, 0.0], 0.5));
    }

    #[test]
    fn test_toggle_twice_restores_material_and_text() {
        let (mut graph, earth) = graph_with_earth();
        let panel = InfoPanel::new("overview", "focus");
        let mut highlight = Highlight::new(Some(earth));

        let before = (emissive(&graph, earth), panel.text(highlight.mode()).to_string());
        highlight.toggle(&mut graph);
        assert_eq!(panel.text(highlight.mode()), "focus");
        highlight.toggle(&mut graph);
        let after = (emissive(&graph, earth), panel.text(highlight.mode()).to_string());

        assert_eq!(before, after);
        assert!(!highlight.is_active());
    }

    #[test]
    fn test_toggle_without_target_switches_mode() {
        let (mut graph, _) = graph_with_earth();
        let mut highlight = Highlight::new(None);
        highlight.toggle(&mut graph);
        assert!(highlight.is_active());
    }

    #[test]
    fn test_custom_glow() {
        let (mut graph, earth) = graph_with_earth();
        let glow = Glow { color: [0.0, 1.0, 0.0], intensity: 1.0 };
        let mut highlight = Highlight::new(Some(earth)).with_glow(glow);
        highlight.toggle(&mut graph);
        assert_eq!(emissive(&graph, earth), ([0.0, 1.0, 0.0], 1.0));
    }

    #[test]
    fn test_display_mode_toggled_is_involution() {
        for mode in [DisplayMode::Overview, DisplayMode::EarthFocus] {
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
    }
}
