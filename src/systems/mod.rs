//! Application systems
//!
//! Window, GPU rendering, animation clock, and background music, each owned
//! by the application and driven from the event loop.

mod audio;
mod render;
mod simulation;
mod window;

pub use audio::{AudioBackend, AudioSystem, NullBackend};
#[cfg(feature = "audio")]
pub use audio::RodioBackend;
pub use render::{RenderError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{WindowError, WindowSystem};
