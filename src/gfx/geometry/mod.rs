//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the editor's primitive shapes
//! procedurally, so primitives never need external model files.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube centered at the origin
//! - **Sphere**: UV sphere of radius 0.5 with configurable resolution
//! - **Capsule**: Radius 0.5 capsule, total height 2.0
//!
//! All generators emit non-indexed triangle lists: every triangle carries its
//! own three vertices.
//!
//! ## Usage
//!
//! ```rust
//! use scenewright::gfx::geometry::{generate_cube, generate_sphere, generate_capsule};
//!
//! let cube = generate_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let sphere = generate_sphere(32, 16);
//! assert_eq!(sphere.vertex_count(), 32 * 16 * 6);
//!
//! let capsule = generate_capsule(16, 8);
//! assert!(capsule.vertex_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::{as_float_buffer, Vertex3D};

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Triangle list, three vertices per triangle
    pub vertices: Vec<Vertex3D>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Eight floats per vertex: position, normal, uv
    pub fn as_floats(&self) -> &[f32] {
        as_float_buffer(&self.vertices)
    }

    pub(crate) fn push_triangle(&mut self, a: Vertex3D, b: Vertex3D, c: Vertex3D) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }
}
