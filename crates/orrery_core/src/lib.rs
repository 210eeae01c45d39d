//! Core types for the orrery
//!
//! - [`Transform`] - Position, X/Y rotation, and uniform scale
//! - [`Material`] / [`MeshShape`] - What a mesh looks like and its geometry
//! - [`SceneGraph`] - Slotmap-backed tree of pivots and meshes
//! - [`SystemTemplate`] - Loadable/saveable description of the system
//! - [`SolarSystem`] - Built scene plus per-frame animation
//! - [`Highlight`] / [`InfoPanel`] - Display mode state and its texts
//! - [`MusicToggle`] - Background music on/off state

mod asset_error;
mod transform;
mod material;
mod scene_graph;
mod template;
mod validator;
mod solar_system;
mod highlight;
mod music;

pub use asset_error::AssetError;
pub use transform::Transform;
pub use material::{hex_to_rgb, Material, MeshShape, Shading, Side};
pub use scene_graph::{DirtyFlags, Node, NodeKey, NodeKind, SceneGraph};
pub use template::{
    BodyTemplate, LightingTemplate, RingTemplate, SceneLoadError, SceneSaveError,
    StarFieldTemplate, SunTemplate, SystemTemplate,
};
pub use validator::{SystemValidator, ValidationError, SEGMENT_RANGE};
pub use solar_system::{Lighting, Planet, SolarSystem};
pub use highlight::{DisplayMode, Glow, Highlight, InfoPanel};
pub use music::{MusicBackend, MusicToggle};

// Re-export commonly used math types for convenience
pub use orrery_math::{Mat4, Vec3};
