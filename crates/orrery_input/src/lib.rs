//! Orbit camera input handling
//!
//! Translates mouse drags and wheel events into camera orbit, pan, and dolly.

mod orbit_controller;

pub use orbit_controller::{CameraControl, OrbitController};
