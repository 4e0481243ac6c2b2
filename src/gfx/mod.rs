//! # Graphics Module
//!
//! This module contains the scene-editing core: procedural geometry, mesh
//! import and caching, the scene graph with its file format, and the
//! read-only views handed to the renderer.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Cube, sphere and capsule tessellation
//! - **Resources** ([`resources`]) - OBJ import and the path-keyed mesh cache
//! - **Scene Management** ([`scene`]) - Object hierarchy, scene graph, scene files
//! - **Rendering** ([`rendering`]) - Draw lists and the renderer trait
//!
//! The renderer and UI live outside this crate. They read
//! [`SceneGraph::all_objects`](scene::SceneGraph::all_objects) and
//! [`MeshCache::lookup`](resources::MeshCache::lookup) and call the graph's
//! mutation methods; they never own scene data.

pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use resources::{MeshCache, MeshHandle};
pub use scene::{ObjectId, ObjectType, SceneGraph, SceneObject};
