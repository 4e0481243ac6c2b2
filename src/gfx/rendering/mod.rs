// src/gfx/rendering/mod.rs
//! Per-frame scene views for the renderer
//!
//! The renderer never touches the scene graph directly. It receives a draw
//! list of model matrices and resolved mesh sources, or is driven through
//! the [`DrawMesh`] trait.

pub mod draw_list;

// Re-export main types
pub use draw_list::{build_draw_list, draw_scene, DrawItem, DrawMesh, MeshSource, PrimitiveMeshes};
