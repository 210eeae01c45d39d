//! Perspective camera orbiting a target point

use orrery_input::CameraControl;
use orrery_math::{mat4, Mat4, Vec3};

/// Keeps the polar angle off the poles so `look_at` never degenerates
const POLAR_EPSILON: f32 = 1e-3;

/// Perspective camera described by eye, target, and up
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
    home_eye: Vec3,
    home_target: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera looking from `eye` at `target`
    pub fn new(eye: Vec3, target: Vec3, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            aspect: 1.0,
            home_eye: eye,
            home_target: target,
        }
    }

    /// Update the aspect ratio from a viewport size
    ///
    /// Degenerate sizes keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        mat4::mul(self.projection_matrix(), self.view_matrix())
    }

    /// Return to the initial eye and target
    pub fn reset(&mut self) {
        self.eye = self.home_eye;
        self.target = self.home_target;
    }

    fn offset(&self) -> Vec3 {
        self.eye - self.target
    }
}

impl CameraControl for PerspectiveCamera {
    fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32) {
        let offset = self.offset();
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let azimuth = offset.x.atan2(offset.z) + delta_azimuth;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + delta_polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        let sin_polar = polar.sin();
        let new_offset = Vec3::new(
            sin_polar * azimuth.sin(),
            polar.cos(),
            sin_polar * azimuth.cos(),
        ) * radius;
        self.eye = self.target + new_offset;
    }

    fn dolly(&mut self, scale: f32, min: f32, max: f32) {
        let offset = self.offset();
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let new_radius = (radius * scale).clamp(min, max);
        self.eye = self.target + offset * (new_radius / radius);
    }

    fn pan(&mut self, right: f32, up: f32) {
        let offset = self.offset();
        // World units spanned by the viewport height at the target's depth
        let visible_height = 2.0 * offset.length() * (self.fov_y * 0.5).tan();

        let forward = (-offset).normalized();
        let right_dir = forward.cross(self.up).normalized();
        let up_dir = right_dir.cross(forward);

        let delta = right_dir * (right * visible_height) + up_dir * (up * visible_height);
        self.eye += delta;
        self.target += delta;
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn eye(&self) -> Vec3 {
        self.eye
    }
}
