//! Orrery - a decorative 3D solar-system viewer
//!
//! The binary wires these modules to a winit event loop; they are exposed as
//! a library so configuration and UI logic can be tested on their own.

pub mod config;
pub mod input;
pub mod systems;
pub mod ui;
