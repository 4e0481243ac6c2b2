// src/gfx/resources/mod.rs
//! Mesh resource management
//!
//! Handles importing OBJ files and keeping one copy of each imported mesh.

pub mod mesh_cache;
pub mod mesh_importer;

// Re-export main types
pub use mesh_cache::{MeshCache, MeshEntry, MeshHandle};
pub use mesh_importer::{import_obj, import_obj_source, ImportedMesh};
