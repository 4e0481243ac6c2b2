//! # Scenewright Prelude
//!
//! Commonly used types in one import, for editor front ends and tools built
//! on the scene core.
//!
//! ## Usage
//!
//! ```no_run
//! use scenewright::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging("info");
//!     let mut session = scenewright::default();
//!
//!     let cube = session.add_primitive(ObjectType::Cube);
//!     let mut transform = Transform::from_position(Vector3::new(0.0, 1.0, 0.0));
//!     transform.rotation.y = 45.0;
//!     session.scene_mut().set_transform(cube, transform)?;
//!
//!     session.save_scene(std::path::Path::new("level.scene"))?;
//!     Ok(())
//! }
//! ```

// Session and configuration
pub use crate::app::EditorSession;
pub use crate::config::{EditorConfig, PrimitiveConfig};
pub use crate::default;
pub use crate::error::{Error, Result};
pub use crate::logging::init_logging;
pub use crate::project::{Project, RecentProjects};

// Scene types
pub use crate::gfx::scene::{
    MeshRef, ObjectId, ObjectType, SceneChange, SceneGraph, SceneObject, SceneStatistics, Transform,
    Vertex3D,
};

// Geometry and resources
pub use crate::gfx::geometry::{generate_capsule, generate_cube, generate_sphere, GeometryData};
pub use crate::gfx::rendering::{DrawItem, DrawMesh, MeshSource, PrimitiveMeshes};
pub use crate::gfx::resources::{MeshCache, MeshEntry, MeshHandle};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Matrix4, Vector3, Zero};
