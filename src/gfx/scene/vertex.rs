//! # Vertex Data Structures
//!
//! This module defines the vertex format shared by procedural primitives and
//! imported meshes. Every vertex is eight packed floats: position, normal and
//! texture coordinates, so a `&[Vertex3D]` can be handed to the renderer as a
//! flat float buffer without copying.

/// Number of `f32` values in one [`Vertex3D`].
pub const FLOATS_PER_VERTEX: usize = 8;

/// A 3D vertex with position, normal and texture coordinates.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations and for viewing a
/// vertex slice as `[f32]` through `bytemuck`.
///
/// # Examples
///
/// ```
/// use scenewright::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.0]);
/// assert_eq!(vertex.as_floats()[3..6], [0.0, 1.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    /// The vertex as its eight packed floats
    pub fn as_floats(&self) -> &[f32; FLOATS_PER_VERTEX] {
        bytemuck::cast_ref(self)
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    /// - Attribute 2: Texture coordinates (Float32x2) at shader location 2
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Views a vertex slice as the flat float buffer the renderer uploads.
pub fn as_float_buffer(vertices: &[Vertex3D]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layout() {
        let vertices = [
            Vertex3D::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.25, 0.75]),
            Vertex3D::new([4.0, 5.0, 6.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
        ];
        let floats = as_float_buffer(&vertices);

        assert_eq!(std::mem::size_of::<Vertex3D>(), FLOATS_PER_VERTEX * 4);
        assert_eq!(floats.len(), 2 * FLOATS_PER_VERTEX);
        assert_eq!(&floats[..8], &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.25, 0.75]);
        assert_eq!(floats[8], 4.0);
    }

    #[test]
    fn test_layout_stride() {
        let layout = Vertex3D::desc();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }
}
