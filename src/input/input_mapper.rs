//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard shortcuts and clicks on the on-screen buttons to viewer
//! actions. Camera drags and the wheel are NOT mapped here; they go
//! directly to the OrbitController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::ui::UiButton;

/// Viewer actions triggered by keys or buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Switch between overview and Earth focus (H key, highlight button)
    ToggleHighlight,
    /// Start or pause the background track (M key, music button)
    ToggleMusic,
    /// Freeze or resume the animation (P or Space)
    TogglePause,
    /// Reset camera to starting position (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

impl From<UiButton> for InputAction {
    fn from(button: UiButton) -> Self {
        match button {
            UiButton::Highlight => InputAction::ToggleHighlight,
            UiButton::Music => InputAction::ToggleMusic,
        }
    }
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for key releases and unbound keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::KeyH => Some(InputAction::ToggleHighlight),
            KeyCode::KeyM => Some(InputAction::ToggleMusic),
            KeyCode::KeyP | KeyCode::Space => Some(InputAction::TogglePause),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }

    /// Map a mouse button to an action
    ///
    /// `hit` is the button under the cursor, if any. A left press on a
    /// button triggers its action; everything else is left for the camera.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        hit: Option<UiButton>,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            hit.map(InputAction::from)
        } else {
            None
        }
    }
}
