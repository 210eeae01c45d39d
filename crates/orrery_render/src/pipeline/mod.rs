//! Scene rendering pipeline and its GPU data types

pub mod types;
pub mod scene_pipeline;

pub use types::{FrameUniforms, MeshVertex, ObjectUniforms};
pub use scene_pipeline::{SceneObject, ScenePipeline, DEPTH_FORMAT};
