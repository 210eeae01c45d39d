//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Owns the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Window handle shared with the render context
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle borderless fullscreen
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show the paused state in the title bar
    pub fn update_title(&self, paused: bool) {
        self.window.set_title(&format_title(&self.base_title, paused));
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, paused: bool) -> String {
    if paused {
        format!("{} [paused]", base)
    } else {
        base.to_string()
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_running() {
        assert_eq!(format_title("Solar System", false), "Solar System");
    }

    #[test]
    fn test_title_paused() {
        assert_eq!(format_title("Solar System", true), "Solar System [paused]");
    }

    #[test]
    fn test_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
