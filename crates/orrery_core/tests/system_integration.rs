//! Integration tests for the system pipeline
//!
//! These tests verify the path from description to animated scene:
//! 1. The shipped RON description parses and validates
//! 2. Building creates the expected nodes
//! 3. Animation keeps bodies on their orbits
//! 4. Highlighting and panel text round-trip

use orrery_core::{
    DisplayMode, Highlight, InfoPanel, NodeKind, Shading, Side, SolarSystem, SystemTemplate,
    SystemValidator,
};

const SCENE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/solar_system.ron");

// ==================== Description Tests ====================

#[test]
fn test_shipped_scene_matches_builtin() {
    let loaded = SystemTemplate::load(SCENE_PATH).expect("scenes/solar_system.ron should parse");
    assert_eq!(loaded, SystemTemplate::default_system());
}

#[test]
fn test_shipped_scene_is_valid() {
    let loaded = SystemTemplate::load(SCENE_PATH).expect("scenes/solar_system.ron should parse");
    let errors = SystemValidator::validate(&loaded);
    assert!(errors.is_empty(), "Unexpected validation errors: {:?}", errors);
}

// ==================== Build Tests ====================

#[test]
fn test_materials_by_role() {
    let system = SolarSystem::build(&SystemTemplate::default_system());
    let graph = system.graph();

    let stars = graph.get(system.star_field()).unwrap().material().unwrap();
    assert_eq!(stars.shading, Shading::Unlit);
    assert_eq!(stars.side, Side::Back);

    let sun = graph.get(system.sun()).unwrap().material().unwrap();
    assert_eq!(sun.shading, Shading::Unlit);

    for planet in system.planets() {
        let material = graph.get(planet.mesh).unwrap().material().unwrap();
        assert_eq!(material.shading, Shading::Lit, "{} should be lit", planet.name);

        if let Some(ring) = planet.ring {
            let ring_material = graph.get(ring).unwrap().material().unwrap();
            assert_eq!(ring_material.side, Side::Double);
            assert_eq!(ring_material.shading, Shading::Unlit);
        }
    }
}

#[test]
fn test_pivots_are_not_drawn() {
    let system = SolarSystem::build(&SystemTemplate::default_system());
    for planet in system.planets() {
        let pivot = system.graph().get(planet.pivot).unwrap();
        assert_eq!(pivot.kind, NodeKind::Pivot);
        assert!(system.graph().meshes().all(|(key, _)| key != planet.pivot));
    }
}

// ==================== Animation Tests ====================

#[test]
fn test_bodies_keep_orbit_distance() {
    let mut system = SolarSystem::build(&SystemTemplate::default_system());
    for _ in 0..600 {
        system.advance(1.0);
    }
    for planet in system.planets() {
        let pos = system.graph().world_position(planet.mesh);
        assert!(
            (pos.length() - planet.distance).abs() < 0.01,
            "{} drifted to {} (expected {})",
            planet.name,
            pos.length(),
            planet.distance
        );
        assert!(pos.y.abs() < 1e-4, "{} left the orbital plane", planet.name);
    }
}

#[test]
fn test_inner_bodies_move_faster() {
    let mut system = SolarSystem::build(&SystemTemplate::default_system());
    system.advance(10.0);

    let mercury = system.planet("Mercury").unwrap().pivot;
    let pluto = system.planet("Pluto").unwrap().pivot;
    let graph = system.graph();
    assert!(
        graph.get(mercury).unwrap().transform.rotation_y
            > graph.get(pluto).unwrap().transform.rotation_y
    );
}

// ==================== Highlight Tests ====================

#[test]
fn test_highlight_round_trip_on_built_system() {
    let mut system = SolarSystem::build(&SystemTemplate::default_system());
    let panel = InfoPanel::new("The solar system", "Earth, the third planet");
    let earth = system.highlight_target().map(|p| p.mesh);
    let mut highlight = Highlight::new(earth);

    let material_before = system.graph().get(earth.unwrap()).unwrap().material().cloned();

    highlight.toggle(system.graph_mut());
    assert_eq!(highlight.mode(), DisplayMode::EarthFocus);
    assert_eq!(panel.text(highlight.mode()), "Earth, the third planet");
    let lit = system.graph().get(earth.unwrap()).unwrap().material().unwrap();
    assert_eq!(lit.emissive, [1.0, 1.0, 0.0]);
    assert_eq!(lit.emissive_intensity, 0.5);

    highlight.toggle(system.graph_mut());
    let material_after = system.graph().get(earth.unwrap()).unwrap().material().cloned();
    assert_eq!(material_before, material_after);
    assert_eq!(panel.text(highlight.mode()), "The solar system");
}
