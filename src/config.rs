//! Editor configuration
//!
//! Plain settings structs with sensible defaults and builder-style setters.
//! Nothing here is read from disk; the embedding application decides where
//! values come from.

use cgmath::Vector3;

/// Tessellation settings for the built-in primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveConfig {
    pub sphere_segments: u32,
    pub sphere_rings: u32,
    pub capsule_segments: u32,
    pub capsule_rings: u32,
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 32,
            sphere_rings: 16,
            capsule_segments: 32,
            capsule_rings: 16,
        }
    }
}

/// Top-level settings for an [`EditorSession`](crate::app::EditorSession)
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub primitives: PrimitiveConfig,
    /// Offset applied to a duplicated object so it does not overlap its source
    pub duplicate_offset: Vector3<f32>,
    /// Maximum number of rows kept in the recent projects list
    pub recent_projects_limit: usize,
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            primitives: PrimitiveConfig::default(),
            duplicate_offset: Vector3::new(1.0, 0.0, 0.0),
            recent_projects_limit: 10,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Builder pattern: Set sphere tessellation
    pub fn with_sphere_detail(mut self, segments: u32, rings: u32) -> Self {
        self.primitives.sphere_segments = segments;
        self.primitives.sphere_rings = rings;
        self
    }

    /// Builder pattern: Set capsule tessellation
    pub fn with_capsule_detail(mut self, segments: u32, rings: u32) -> Self {
        self.primitives.capsule_segments = segments;
        self.primitives.capsule_rings = rings;
        self
    }

    /// Builder pattern: Set the offset used by duplicate
    pub fn with_duplicate_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.duplicate_offset = Vector3::new(x, y, z);
        self
    }

    /// Builder pattern: Set the recent projects limit (at least 1)
    pub fn with_recent_projects_limit(mut self, limit: usize) -> Self {
        self.recent_projects_limit = limit.max(1);
        self
    }

    /// Builder pattern: Set the default log filter
    pub fn with_log_filter(mut self, filter: &str) -> Self {
        self.log_filter = filter.to_string();
        self
    }
}
