//! Orrery rendering library
//!
//! This crate provides the wgpu-based rendering for the solar system.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - Orbiting perspective camera
//! - [`mesh`] - UV sphere and ring geometry
//! - [`texture::TextureCache`] - Image textures loaded by path
//! - [`pipeline::ScenePipeline`] - Textured, lit mesh rendering
//! - [`overlay::Overlay`] - Screen-space rectangles and text

pub mod context;
pub mod camera;
pub mod mesh;
pub mod texture;
pub mod pipeline;
pub mod overlay;

// Re-export core types for convenience
pub use orrery_core::{Material, MeshShape, SceneGraph, Side, SolarSystem};
pub use orrery_math::{Mat4, Vec3};
