//! Orrery Mathematics Library
//!
//! Small, dependency-light 3D math for the orrery.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//! - [`ScreenPoint`] - result of projecting a world point onto the window

mod vec3;
pub mod mat4;
pub mod projection;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use projection::{project_to_screen, ScreenPoint};
