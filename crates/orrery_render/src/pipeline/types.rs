//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use orrery_core::{Lighting, Material, Shading};
use orrery_math::{mat4, Mat4, Vec3};

/// A textured mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
    /// Texture coordinate, `v = 0` at the top of the image
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex buffer layout matching `scene.wgsl`
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // uv: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }
}

/// Per-frame uniforms (camera and lights)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: Mat4,
    /// Camera eye (xyz), w unused
    pub camera_pos: [f32; 4],
    /// Ambient light color (rgb), w unused
    pub ambient: [f32; 4],
    /// Point light position (xyz) and range (w)
    pub light_pos: [f32; 4],
    /// Point light color (rgb) and intensity (w)
    pub light_color: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            camera_pos: [0.0; 4],
            ambient: [0.0; 4],
            light_pos: [0.0; 4],
            light_color: [0.0; 4],
        }
    }
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, eye: Vec3, lighting: &Lighting) -> Self {
        let [ar, ag, ab] = lighting.ambient;
        let [lr, lg, lb] = lighting.point_color;
        let p = lighting.point_position;
        Self {
            view_proj,
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            ambient: [ar, ag, ab, 1.0],
            light_pos: [p.x, p.y, p.z, lighting.point_range],
            light_color: [lr, lg, lb, lighting.point_intensity],
        }
    }
}

/// Per-object uniforms (model matrix and material)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    /// Base color multiplier
    pub base_color: [f32; 4],
    /// Emissive color (rgb) and intensity (w)
    pub emissive: [f32; 4],
    /// x: 1.0 when lit, 0.0 when unlit; yzw unused
    pub params: [f32; 4],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            base_color: [1.0; 4],
            emissive: [0.0; 4],
            params: [0.0; 4],
        }
    }
}

impl ObjectUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let [er, eg, eb] = material.emissive;
        let lit = match material.shading {
            Shading::Lit => 1.0,
            Shading::Unlit => 0.0,
        };
        Self {
            model,
            base_color: material.base_color,
            emissive: [er, eg, eb, material.emissive_intensity],
            params: [lit, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{SolarSystem, SystemTemplate};

    #[test]
    fn test_mesh_vertex_size() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::layout().array_stride, 32);
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 128);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 112);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniforms>() % 16, 0);
    }

    #[test]
    fn test_frame_uniforms_pack_light() {
        let system = SolarSystem::build(&SystemTemplate::default_system());
        let u = FrameUniforms::new(mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0), system.lighting());
        assert_eq!(u.light_pos[3], 300.0);
        assert_eq!(u.light_color[3], 2.5);
        assert_eq!(u.camera_pos, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_object_uniforms_flags() {
        let lit = ObjectUniforms::new(mat4::IDENTITY, &Material::lit("earth.jpg"));
        assert_eq!(lit.params[0], 1.0);
        let unlit = ObjectUniforms::new(mat4::IDENTITY, &Material::unlit("sun.jpg"));
        assert_eq!(unlit.params[0], 0.0);

        let mut glowing = Material::lit("earth.jpg");
        glowing.emissive = [1.0, 1.0, 0.0];
        glowing.emissive_intensity = 0.5;
        let u = ObjectUniforms::new(mat4::IDENTITY, &glowing);
        assert_eq!(u.emissive, [1.0, 1.0, 0.0, 0.5]);
    }
}
