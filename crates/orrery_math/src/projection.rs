//! World-to-screen projection
//!
//! Used to pin 2D overlays (labels) to objects in the 3D scene.

use crate::mat4::{self, Mat4};
use crate::Vec3;

/// A position in window pixel coordinates (origin top-left, +Y down)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// False when the point is behind the camera or outside the depth range
    pub visible: bool,
}

/// Project a world-space point to window pixels.
///
/// The point goes through the view-projection matrix to clip space, is
/// divided by `w` into normalized device coordinates, then NDC `[-1, 1]` is
/// mapped onto `[0, width]` and `[height, 0]`.
pub fn project_to_screen(world: Vec3, view_proj: Mat4, width: f32, height: f32) -> ScreenPoint {
    let clip = mat4::transform_point(view_proj, world);
    let w = clip[3];

    if w.abs() < f32::EPSILON {
        return ScreenPoint { x: 0.0, y: 0.0, visible: false };
    }

    let ndc_x = clip[0] / w;
    let ndc_y = clip[1] / w;
    let ndc_z = clip[2] / w;

    ScreenPoint {
        x: (ndc_x * 0.5 + 0.5) * width,
        y: -(ndc_y * 0.5 - 0.5) * height,
        visible: w > 0.0 && (0.0..=1.0).contains(&ndc_z),
    }
}
