//! # Scene Management Module
//!
//! This module provides the editor's scene graph: typed objects with
//! transforms, their parent/child hierarchy, and the text format scenes are
//! saved in.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Owns every object and is the only place hierarchy changes
//! - [`SceneObject`] - One node: id, name, type, transform, links, mesh reference
//! - [`serializer`] - Versioned `key=value` scene files
//! - [`Vertex3D`] - Vertex format shared by primitives and imported meshes
//!
//! ## Usage
//!
//! ```no_run
//! use scenewright::gfx::scene::{serializer, ObjectType, SceneGraph};
//! use scenewright::gfx::resources::MeshCache;
//! use std::path::Path;
//!
//! let mut graph = SceneGraph::new();
//! let table = graph.add_object(ObjectType::Cube, "Table");
//! let lamp = graph.add_imported_mesh("Lamp", "models/lamp.obj", None);
//! graph.reparent(lamp, Some(table)).unwrap();
//! serializer::save(Path::new("room.scene"), &graph).unwrap();
//!
//! let mut cache = MeshCache::new();
//! let snapshot = serializer::load(Path::new("room.scene"), &mut cache).unwrap();
//! let restored = SceneGraph::from_snapshot(snapshot);
//! ```

pub mod object;
pub mod scene;
pub mod serializer;
pub mod vertex;

// Re-export main types
pub use object::{MeshRef, ObjectId, ObjectType, SceneObject, Transform};
pub use scene::{ChangeCallback, SceneChange, SceneGraph, SceneSnapshot, SceneStatistics};
pub use vertex::Vertex3D;
