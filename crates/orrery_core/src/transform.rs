//! 3D Transform (position, rotation, scale)
//!
//! A Transform is expressed relative to the node's parent in the scene graph.

use orrery_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};
use std::f32::consts::TAU;

/// A transform with position, X/Y Euler rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,
    /// Rotation about the X axis in radians
    pub rotation_x: f32,
    /// Rotation about the Y axis in radians, kept in `[0, 2π)`
    pub rotation_y: f32,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Builder: set the X rotation
    pub fn with_rotation_x(mut self, angle: f32) -> Self {
        self.rotation_x = angle;
        self
    }

    /// Builder: set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Spin about the local Y axis, wrapping the accumulated angle
    pub fn rotate_y(&mut self, delta: f32) {
        self.rotation_y = (self.rotation_y + delta).rem_euclid(TAU);
    }

    /// Local-to-parent matrix: translate * (rotate_x * rotate_y) * scale
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = mat4::mul(
            mat4::rotation_x(self.rotation_x),
            mat4::rotation_y(self.rotation_y),
        );
        mat4::mul(
            mat4::translation(self.position),
            mat4::mul(rotation, mat4::scale(self.scale)),
        )
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let h = mat4::transform_point(self.to_matrix(), p);
        Vec3::new(h[0], h[1], h[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(t.transform_point(p), p));
    }

    #[test]
    fn test_transform_order() {
        // scale, then rotate, then translate
        let mut t = Transform::from_position(Vec3::new(10.0, 0.0, 0.0)).with_scale(2.0);
        t.rotate_y(FRAC_PI_2);

        let result = t.transform_point(Vec3::X);
        assert!(vec_approx_eq(result, Vec3::new(10.0, 0.0, -2.0)),
            "Expected (10, 0, -2), got {:?}", result);
    }

    #[test]
    fn test_rotate_y_wraps() {
        let mut t = Transform::identity();
        t.rotate_y(1.5 * PI);
        t.rotate_y(PI);
        assert!((t.rotation_y - 0.5 * PI).abs() < EPSILON);

        t.rotate_y(-PI);
        assert!((t.rotation_y - 1.5 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_ring_tilt_lays_plane_flat() {
        // A ring is built in the XY plane; tilting by -90° about X lays it in XZ
        let t = Transform::identity().with_rotation_x(-FRAC_PI_2);
        let result = t.transform_point(Vec3::new(0.0, 5.0, 0.0));
        assert!(vec_approx_eq(result, Vec3::new(0.0, 0.0, -5.0)), "got {:?}", result);
    }

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, 1.0);
    }
}
