//! Orbit-style camera controller
//!
//! Controls:
//! - Left drag: rotate around the target
//! - Right drag: pan the target
//! - Mouse wheel: dolly in/out, clamped to `[min_distance, max_distance]`

use std::f32::consts::TAU;

use orrery_math::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of touchpad scroll treated as one wheel notch
const PIXELS_PER_LINE: f64 = 50.0;

/// Camera controller for orbit input handling
pub struct OrbitController {
    // Mouse state
    rotating: bool,
    panning: bool,
    last_cursor: Option<(f64, f64)>,
    pending_rotate: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: f32,

    // Configuration
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enabled: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            rotating: false,
            panning: false,
            last_cursor: None,
            pending_rotate: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0.0,

            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: 1000.0,
            enabled: true,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right | MouseButton::Middle => self.panning = pressed,
            _ => {}
        }
    }

    /// Process an absolute cursor position (window pixels)
    ///
    /// Drag deltas are accumulated only while a button is held.
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_cursor {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            if self.rotating {
                self.pending_rotate.0 += dx;
                self.pending_rotate.1 += dy;
            } else if self.panning {
                self.pending_pan.0 += dx;
                self.pending_pan.1 += dy;
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Forget the last cursor position (cursor left the window)
    pub fn process_cursor_left(&mut self) {
        self.last_cursor = None;
    }

    /// Process a wheel event; positive is "scroll up", which zooms in
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        self.pending_zoom += notches;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }

    /// Apply accumulated input to the camera
    ///
    /// `viewport_height` converts pixel drags into angles and pan fractions.
    /// Returns the camera eye position.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, viewport_height: f32) -> Vec3 {
        if self.enabled && viewport_height > 0.0 {
            let (dx, dy) = self.pending_rotate;
            if dx != 0.0 || dy != 0.0 {
                // A drag across the full height turns one full circle
                camera.orbit(
                    -TAU * dx / viewport_height * self.rotate_speed,
                    -TAU * dy / viewport_height * self.rotate_speed,
                );
            }

            let (px, py) = self.pending_pan;
            if px != 0.0 || py != 0.0 {
                camera.pan(
                    -px / viewport_height * self.pan_speed,
                    py / viewport_height * self.pan_speed,
                );
            }

            if self.pending_zoom != 0.0 {
                let scale = 0.95f32.powf(self.zoom_speed * self.pending_zoom);
                camera.dolly(scale, self.min_distance, self.max_distance);
            }
        }

        self.pending_rotate = (0.0, 0.0);
        self.pending_pan = (0.0, 0.0);
        self.pending_zoom = 0.0;

        camera.eye()
    }

    /// Builder: set rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set pan speed
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Builder: set the dolly limits
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(self.min_distance);
        self
    }
}

/// Trait for camera control
/// Allows the controller to drive any camera that orbits a target
pub trait CameraControl {
    /// Rotate the eye around the target by azimuth/polar deltas (radians)
    fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32);
    /// Multiply the eye-target distance by `scale`, clamped to `[min, max]`
    fn dolly(&mut self, scale: f32, min: f32, max: f32);
    /// Move eye and target together, in fractions of the viewport height
    fn pan(&mut self, right: f32, up: f32);
    fn target(&self) -> Vec3;
    fn eye(&self) -> Vec3;

    fn distance(&self) -> f32 {
        (self.eye() - self.target()).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    /// Minimal spherical-coordinate camera
    struct TestCamera {
        target: Vec3,
        distance: f32,
        azimuth: f32,
        polar: f32,
        pans: Vec<(f32, f32)>,
    }

    impl TestCamera {
        fn new(distance: f32) -> Self {
            Self {
                target: Vec3::ZERO,
                distance,
                azimuth: 0.0,
                polar: 1.0,
                pans: Vec::new(),
            }
        }
    }

    impl CameraControl for TestCamera {
        fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32) {
            self.azimuth += delta_azimuth;
            self.polar += delta_polar;
        }

        fn dolly(&mut self, scale: f32, min: f32, max: f32) {
            self.distance = (self.distance * scale).clamp(min, max);
        }

        fn pan(&mut self, right: f32, up: f32) {
            self.pans.push((right, up));
        }

        fn target(&self) -> Vec3 {
            self.target
        }

        fn eye(&self) -> Vec3 {
            let s = self.polar.sin();
            self.target
                + Vec3::new(s * self.azimuth.sin(), self.polar.cos(), s * self.azimuth.cos())
                    * self.distance
        }
    }

    fn drag(controller: &mut OrbitController, button: MouseButton, from: (f64, f64), to: (f64, f64)) {
        controller.process_cursor_moved(from.0, from.1);
        controller.process_mouse_button(button, ElementState::Pressed);
        controller.process_cursor_moved(to.0, to.1);
        controller.process_mouse_button(button, ElementState::Released);
    }

    #[test]
    fn test_no_input_no_change() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        let before = camera.eye();
        let after = controller.update(&mut camera, 600.0);
        assert!((before - after).length() < 1e-5);
    }

    #[test]
    fn test_left_drag_orbits() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        drag(&mut controller, MouseButton::Left, (100.0, 100.0), (400.0, 100.0));
        controller.update(&mut camera, 600.0);

        // Half the viewport height is half a turn
        assert!((camera.azimuth + std::f32::consts::PI).abs() < 1e-4);
        assert_eq!(camera.polar, 1.0);
        assert!(camera.pans.is_empty());
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        controller.process_cursor_moved(0.0, 0.0);
        controller.process_cursor_moved(50.0, 50.0);
        controller.update(&mut camera, 600.0);
        assert_eq!(camera.azimuth, 0.0);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_right_drag_pans() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        drag(&mut controller, MouseButton::Right, (0.0, 0.0), (60.0, 30.0));
        controller.update(&mut camera, 600.0);

        assert_eq!(camera.pans.len(), 1);
        let (right, up) = camera.pans[0];
        assert!((right + 0.1).abs() < 1e-5);
        assert!((up - 0.05).abs() < 1e-5);
        assert_eq!(camera.azimuth, 0.0);
    }

    #[test]
    fn test_scroll_zooms_in() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut camera, 600.0);
        assert!((camera.distance - 95.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_never_exceeds_max_distance() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(900.0);
        for _ in 0..50 {
            controller.process_scroll(MouseScrollDelta::LineDelta(0.0, -3.0));
            controller.update(&mut camera, 600.0);
            assert!(camera.distance <= 1000.0);
        }
        assert!((camera.distance - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_pixel_scroll() {
        let mut controller = OrbitController::new().with_distance_limits(10.0, 500.0);
        let mut camera = TestCamera::new(100.0);
        controller.process_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 100.0)));
        controller.update(&mut camera, 600.0);
        assert!((camera.distance - 100.0 * 0.95f32.powi(2)).abs() < 1e-3);
    }

    #[test]
    fn test_pending_input_resets() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new(100.0);
        drag(&mut controller, MouseButton::Left, (0.0, 0.0), (10.0, 0.0));
        controller.update(&mut camera, 600.0);
        let azimuth = camera.azimuth;
        controller.update(&mut camera, 600.0);
        assert_eq!(camera.azimuth, azimuth);
    }

    #[test]
    fn test_disabled_discards_input() {
        let mut controller = OrbitController::new();
        controller.enabled = false;
        let mut camera = TestCamera::new(100.0);
        drag(&mut controller, MouseButton::Left, (0.0, 0.0), (10.0, 0.0));
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut camera, 600.0);
        assert_eq!(camera.azimuth, 0.0);
        assert_eq!(camera.distance, 100.0);
    }

    #[test]
    fn test_distance_limits_builder() {
        let controller = OrbitController::new().with_distance_limits(50.0, 20.0);
        assert_eq!(controller.min_distance, 50.0);
        assert_eq!(controller.max_distance, 50.0);
    }
}
