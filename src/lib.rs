// src/lib.rs
//! Scenewright Scene Core
//!
//! Scene graph, mesh resources and scene persistence for a 3D scene editor.
//! Rendering backends and UI live outside this crate and consume the draw
//! list it produces.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod prelude;
pub mod project;

// Re-export main types for convenience
pub use app::EditorSession;
pub use config::EditorConfig;
pub use error::{Error, Result};

/// Creates an editor session with default settings and an unnamed project
pub fn default() -> EditorSession {
    EditorSession::new(EditorConfig::default(), project::Project::new("Untitled"))
}
