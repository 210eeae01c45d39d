//! Sphere and ring geometry
//!
//! Both generators follow the vertex order and UV layout of the common
//! web-3D sphere and ring primitives, so equirectangular planet maps and
//! radial ring strips line up without modification.

use std::f32::consts::{PI, TAU};

use orrery_core::{MeshShape, SEGMENT_RANGE};
use wgpu::util::DeviceExt;

use crate::pipeline::MeshVertex;

/// Indexed triangle list on the CPU
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build geometry for a shape
    pub fn from_shape(shape: &MeshShape) -> Self {
        match *shape {
            MeshShape::Sphere { radius, segments } => sphere(radius, segments, segments),
            MeshShape::Ring { inner_radius, outer_radius, segments } => {
                ring(inner_radius, outer_radius, segments)
            }
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centered at the origin, north pole at +Y
///
/// `width_segments` slices around the equator, `height_segments` bands from
/// pole to pole. Pole rows collapse to single triangles. Both counts are
/// clamped to at most `SEGMENT_RANGE.end()`.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let max = *SEGMENT_RANGE.end();
    let w = width_segments.clamp(3, max);
    let h = height_segments.clamp(2, max);

    let mut vertices = Vec::with_capacity((w as usize + 1) * (h as usize + 1));
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            let normal = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            vertices.push(MeshVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                uv: [u, v],
            });
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity(w as usize * h as usize * 6);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Flat annulus in the XY plane facing +Z
///
/// UVs map the outer radius to the texture edges, so a ring strip image is
/// sampled radially.
pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.clamp(*SEGMENT_RANGE.start(), *SEGMENT_RANGE.end());
    let outer = outer_radius.max(f32::EPSILON);

    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let x = radius * angle.cos();
            let y = radius * angle.sin();
            vertices.push(MeshVertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                // Image rows run top-down, so flip v
                uv: [(x / outer + 1.0) * 0.5, 1.0 - (y / outer + 1.0) * 0.5],
            });
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a = i;
        let b = i + segments + 1;
        let c = i + segments + 2;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    MeshData { vertices, indices }
}

/// Vertex and index buffers on the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", label)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", label)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_sphere_counts() {
        let mesh = sphere(1.0, 30, 30);
        assert_eq!(mesh.vertices.len(), 31 * 31);
        // Pole bands contribute one triangle per slice, the rest two
        assert_eq!(mesh.triangle_count(), 30 * 2 + 30 * 28 * 2);
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = sphere(6.0, 12, 8);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert!(((x * x + y * y + z * z).sqrt() - 6.0).abs() < EPSILON);
            let [nx, ny, nz] = v.normal;
            assert!(((nx * nx + ny * ny + nz * nz).sqrt() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sphere_top_row_is_north_pole() {
        let mesh = sphere(2.0, 8, 4);
        assert!((mesh.vertices[0].position[1] - 2.0).abs() < EPSILON);
        assert_eq!(mesh.vertices[0].uv[1], 0.0);
        let last = mesh.vertices.last().unwrap();
        assert!((last.position[1] + 2.0).abs() < EPSILON);
        assert_eq!(last.uv[1], 1.0);
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let mesh = sphere(1.0, 10, 10);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|i| *i < n));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_sphere_clamps_segments() {
        let mesh = sphere(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }

    #[test]
    fn test_oversized_segments_clamped() {
        let max = *SEGMENT_RANGE.end() as usize;
        let mesh = MeshData::from_shape(&MeshShape::Sphere { radius: 1.0, segments: 70_000 });
        assert_eq!(mesh.vertices.len(), (max + 1) * (max + 1));

        let ring_mesh = ring(1.0, 2.0, u32::MAX);
        assert_eq!(ring_mesh.vertices.len(), (max + 1) * 2);
        assert_eq!(ring_mesh.triangle_count(), max * 2);
    }

    #[test]
    fn test_ring_counts_and_radii() {
        let mesh = ring(10.0, 20.0, 32);
        assert_eq!(mesh.vertices.len(), 66);
        assert_eq!(mesh.triangle_count(), 64);
        for (i, v) in mesh.vertices.iter().enumerate() {
            let [x, y, z] = v.position;
            let r = (x * x + y * y).sqrt();
            let expected = if i < 33 { 10.0 } else { 20.0 };
            assert!((r - expected).abs() < EPSILON);
            assert_eq!(z, 0.0);
        }
    }

    #[test]
    fn test_ring_uvs_in_unit_square() {
        let mesh = ring(7.0, 12.0, 32);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
        // Outer vertex at angle 0 maps to the right edge
        assert!((mesh.vertices[33].uv[0] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_from_shape() {
        let sphere_mesh = MeshData::from_shape(&MeshShape::Sphere { radius: 3.2, segments: 30 });
        assert_eq!(sphere_mesh.vertices.len(), 31 * 31);
        let ring_mesh = MeshData::from_shape(&MeshShape::Ring {
            inner_radius: 7.0,
            outer_radius: 12.0,
            segments: 32,
        });
        assert_eq!(ring_mesh.triangle_count(), 64);
    }
}
