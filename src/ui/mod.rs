//! On-screen controls and text
//!
//! Layout only; drawing goes through the renderer's overlay.

mod layout;

pub use layout::{Rect, UiButton, UiLayout, UiState};
