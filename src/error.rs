//! Error types for scene editing, mesh import and scene persistence.

use std::path::PathBuf;
use thiserror::Error;

use crate::gfx::resources::mesh_cache::MeshHandle;
use crate::gfx::scene::object::ObjectId;

/// Error type for every fallible operation in the editor core.
///
/// None of these are fatal: the caller logs the condition and keeps the
/// scene in its previous consistent state.
#[derive(Error, Debug)]
pub enum Error {
    /// A mesh file could not be read, parsed, or produced no geometry.
    #[error("Failed to import mesh '{path}': {reason}")]
    Import {
        /// Path of the mesh file.
        path: PathBuf,
        /// Human readable cause.
        reason: String,
    },

    /// A scene file is malformed.
    #[error("Scene file parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number, 0 when the problem is not tied to a line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// No object with this id exists in the graph.
    #[error("Object {0} not found")]
    ObjectNotFound(ObjectId),

    /// No cache entry with this handle exists.
    #[error("Mesh handle {0} not found")]
    MeshNotFound(MeshHandle),

    /// A reparent request would break the hierarchy.
    #[error("Cannot parent object {child} under {parent}: {reason}")]
    InvalidReparent {
        child: ObjectId,
        parent: ObjectId,
        reason: &'static str,
    },

    /// A file could not be opened for reading or writing.
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn import(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Import {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
