//! The live solar system: scene graph plus per-body animation handles
//!
//! Each body hangs off its own pivot at the origin. Spinning the body mesh
//! rotates it in place; spinning the pivot carries the mesh (and its ring)
//! around the sun at a fixed distance.

use std::f32::consts::FRAC_PI_2;

use orrery_math::Vec3;

use crate::material::{hex_to_rgb, Material, MeshShape, Side};
use crate::scene_graph::{NodeKey, NodeKind, SceneGraph};
use crate::template::{BodyTemplate, LightingTemplate, SystemTemplate};
use crate::transform::Transform;

/// Handles and rates for one orbiting body
#[derive(Clone, Debug)]
pub struct Planet {
    pub name: String,
    pub pivot: NodeKey,
    pub mesh: NodeKey,
    pub ring: Option<NodeKey>,
    pub spin: f32,
    pub orbit: f32,
    pub distance: f32,
}

/// Scene lights in render-ready form
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: [f32; 3],
    pub point_color: [f32; 3],
    pub point_intensity: f32,
    pub point_range: f32,
    pub point_position: Vec3,
}

impl From<&LightingTemplate> for Lighting {
    fn from(t: &LightingTemplate) -> Self {
        Self {
            ambient: hex_to_rgb(t.ambient),
            point_color: hex_to_rgb(t.point_color),
            point_intensity: t.point_intensity,
            point_range: t.point_range,
            point_position: Vec3::from_array(t.point_position),
        }
    }
}

/// All transient visual objects plus what is needed to animate them
pub struct SolarSystem {
    graph: SceneGraph,
    star_field: NodeKey,
    sun: NodeKey,
    sun_spin: f32,
    planets: Vec<Planet>,
    lighting: Lighting,
    highlight_target: String,
}

impl SolarSystem {
    /// Create every node described by the template
    pub fn build(template: &SystemTemplate) -> Self {
        let mut graph = SceneGraph::new();

        let star_field = graph.add_root(
            "star_field",
            Transform::identity(),
            NodeKind::Mesh {
                mesh: MeshShape::Sphere {
                    radius: template.star_field.radius,
                    segments: template.star_field.segments,
                },
                material: Material::unlit(template.star_field.texture.as_str()).with_side(Side::Back),
            },
        );

        let sun = graph.add_root(
            "sun",
            Transform::identity(),
            NodeKind::Mesh {
                mesh: MeshShape::Sphere {
                    radius: template.sun.radius,
                    segments: template.sun.segments,
                },
                material: Material::unlit(template.sun.texture.as_str()),
            },
        );

        let planets = template
            .bodies
            .iter()
            .map(|body| Self::add_planet(&mut graph, body, template.body_segments))
            .collect();

        log::debug!("Built '{}' with {} nodes", template.name, graph.len());

        Self {
            graph,
            star_field,
            sun,
            sun_spin: template.sun.spin,
            planets,
            lighting: Lighting::from(&template.lighting),
            highlight_target: template.highlight_target.clone(),
        }
    }

    fn add_planet(graph: &mut SceneGraph, body: &BodyTemplate, segments: u32) -> Planet {
        let pivot = graph.add_root(format!("{}_pivot", body.name), Transform::identity(), NodeKind::Pivot);
        let offset = Vec3::new(body.distance, 0.0, 0.0);

        let mesh = graph
            .add_child(
                pivot,
                body.name.as_str(),
                Transform::from_position(offset),
                NodeKind::Mesh {
                    mesh: MeshShape::Sphere { radius: body.radius, segments },
                    material: Material::lit(body.texture.as_str()),
                },
            )
            .unwrap_or(pivot);

        let ring = body.ring.as_ref().and_then(|ring| {
            graph.add_child(
                pivot,
                format!("{}_ring", body.name),
                Transform::from_position(offset).with_rotation_x(-FRAC_PI_2),
                NodeKind::Mesh {
                    mesh: MeshShape::Ring {
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                        segments: ring.segments,
                    },
                    material: Material::unlit(ring.texture.as_str()).with_side(Side::Double),
                },
            )
        });

        Planet {
            name: body.name.clone(),
            pivot,
            mesh,
            ring,
            spin: body.spin,
            orbit: body.orbit,
            distance: body.distance,
        }
    }

    /// Advance the animation by a (possibly fractional) number of reference frames
    pub fn advance(&mut self, frames: f32) {
        if frames <= 0.0 {
            return;
        }
        self.graph.rotate_y(self.sun, self.sun_spin * frames);
        for planet in &self.planets {
            self.graph.rotate_y(planet.mesh, planet.spin * frames);
            self.graph.rotate_y(planet.pivot, planet.orbit * frames);
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    /// The body the highlight acts on
    pub fn highlight_target(&self) -> Option<&Planet> {
        self.planet(&self.highlight_target)
    }

    pub fn sun(&self) -> NodeKey {
        self.sun
    }

    pub fn star_field(&self) -> NodeKey {
        self.star_field
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// World-space center of a body
    pub fn world_position_of(&self, name: &str) -> Option<Vec3> {
        self.planet(name).map(|p| self.graph.world_position(p.mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    #[test]
    fn test_build_node_counts() {
        let system = SolarSystem::build(&SystemTemplate::default_system());
        // star field + sun + 9 pivots + 9 meshes + 2 rings
        assert_eq!(system.graph().len(), 22);
        assert_eq!(system.planets().len(), 9);
        assert_eq!(system.graph().meshes().count(), 13);
    }

    #[test]
    fn test_initial_positions_on_x_axis() {
        let system = SolarSystem::build(&SystemTemplate::default_system());
        let earth = system.world_position_of("Earth").unwrap();
        assert!((earth - Vec3::new(62.0, 0.0, 0.0)).length() < EPSILON);
        assert!(system.world_position_of("Vulcan").is_none());
    }

    #[test]
    fn test_ring_follows_planet() {
        let mut system = SolarSystem::build(&SystemTemplate::default_system());
        system.advance(500.0);
        let saturn = system.planet("Saturn").unwrap();
        let ring = saturn.ring.unwrap();
        let ring_pos = system.graph().world_position(ring);
        let body_pos = system.graph().world_position(saturn.mesh);
        assert!((ring_pos - body_pos).length() < EPSILON);
    }

    #[test]
    fn test_advance_rotates_pivots_and_meshes() {
        let mut system = SolarSystem::build(&SystemTemplate::default_system());
        system.advance(1.0);

        let earth = system.planet("Earth").unwrap().clone();
        let graph = system.graph();
        assert!((graph.get(earth.pivot).unwrap().transform.rotation_y - 0.01).abs() < 1e-6);
        assert!((graph.get(earth.mesh).unwrap().transform.rotation_y - 0.02).abs() < 1e-6);
        assert!((graph.get(system.sun()).unwrap().transform.rotation_y - 0.004).abs() < 1e-6);
        assert_eq!(graph.get(system.star_field()).unwrap().transform.rotation_y, 0.0);
    }

    #[test]
    fn test_advance_non_positive_is_noop() {
        let mut system = SolarSystem::build(&SystemTemplate::default_system());
        system.graph_mut().clear_dirty();
        system.advance(0.0);
        system.advance(-3.0);
        assert!(!system.graph().any_dirty());
    }

    #[test]
    fn test_fractional_frames_accumulate() {
        let mut a = SolarSystem::build(&SystemTemplate::default_system());
        let mut b = SolarSystem::build(&SystemTemplate::default_system());
        a.advance(1.0);
        b.advance(0.5);
        b.advance(0.5);
        let pa = a.world_position_of("Mercury").unwrap();
        let pb = b.world_position_of("Mercury").unwrap();
        assert!((pa - pb).length() < EPSILON);
    }

    #[test]
    fn test_lighting_conversion() {
        let system = SolarSystem::build(&SystemTemplate::default_system());
        let light = system.lighting();
        assert_eq!(light.point_color, [1.0, 1.0, 1.0]);
        assert_eq!(light.point_range, 300.0);
        assert!((light.ambient[1] - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_highlight_target() {
        let system = SolarSystem::build(&SystemTemplate::default_system());
        assert_eq!(system.highlight_target().unwrap().name, "Earth");
    }
}
