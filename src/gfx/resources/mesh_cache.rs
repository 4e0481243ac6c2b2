//! Imported mesh storage
//!
//! Meshes are imported once per source path and referenced by [`MeshHandle`].
//! The cache is owned by the editor session and lent to whoever needs it;
//! entries are never removed.

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use super::mesh_importer::{import_obj, ImportedMesh};
use crate::error::{Error, Result};
use crate::gfx::scene::vertex::{as_float_buffer, Vertex3D};

/// Opaque handle to a cached mesh, valid for the lifetime of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u32);

impl MeshHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One imported mesh. Immutable once stored.
#[derive(Debug, Clone)]
pub struct MeshEntry {
    source_path: PathBuf,
    vertices: Vec<Vertex3D>,
    face_count: usize,
    has_original_normals: bool,
    has_tex_coords: bool,
}

impl MeshEntry {
    fn from_import(source_path: PathBuf, mesh: ImportedMesh) -> Self {
        Self {
            source_path,
            vertices: mesh.vertices,
            face_count: mesh.face_count,
            has_original_normals: mesh.has_normals,
            has_tex_coords: mesh.has_tex_coords,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    /// Flat vertex buffer, 8 floats per vertex
    pub fn vertex_buffer(&self) -> &[f32] {
        as_float_buffer(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn has_original_normals(&self) -> bool {
        self.has_original_normals
    }

    pub fn has_tex_coords(&self) -> bool {
        self.has_tex_coords
    }
}

/// Path-deduplicating store of imported meshes
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: Vec<MeshEntry>,
    by_path: HashMap<PathBuf, MeshHandle>,
    imports_performed: usize,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `path`, importing the file on first use
    ///
    /// Failed imports are not cached, so a later call retries.
    pub fn get_or_import(&mut self, path: impl AsRef<Path>) -> Result<MeshHandle> {
        let key = normalize_path(path.as_ref());
        if let Some(&handle) = self.by_path.get(&key) {
            debug!("Mesh cache hit for '{}' -> {}", key.display(), handle);
            return Ok(handle);
        }
        self.import_and_store(key)
    }

    /// Re-imports `path` unconditionally and stores it under a new handle
    ///
    /// Earlier handles for the same path stay valid and keep their old data;
    /// only future lookups by path see the new entry.
    pub fn force_reload(&mut self, path: impl AsRef<Path>) -> Result<MeshHandle> {
        let key = normalize_path(path.as_ref());
        let previous = self.by_path.get(&key).copied();
        let handle = self.import_and_store(key)?;
        if let Some(previous) = previous {
            info!("Reloaded mesh {} as {}", previous, handle);
        }
        Ok(handle)
    }

    fn import_and_store(&mut self, key: PathBuf) -> Result<MeshHandle> {
        self.imports_performed += 1;
        let mesh = import_obj(&key)?;

        let handle = MeshHandle(self.entries.len() as u32);
        self.entries.push(MeshEntry::from_import(key.clone(), mesh));
        self.by_path.insert(key, handle);
        Ok(handle)
    }

    pub fn lookup(&self, handle: MeshHandle) -> Result<&MeshEntry> {
        self.entries
            .get(handle.index())
            .ok_or(Error::MeshNotFound(handle))
    }

    /// Current handle for a path, without importing
    pub fn handle_for(&self, path: impl AsRef<Path>) -> Option<MeshHandle> {
        self.by_path.get(&normalize_path(path.as_ref())).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times a file was actually parsed, successful or not
    pub fn imports_performed(&self) -> usize {
        self.imports_performed
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &MeshEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (MeshHandle(i as u32), entry))
    }
}

/// Lexical normalization: drops `.` segments and resolves `..` against
/// preceding normal segments. Case is kept and symlinks are not followed.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scenewright_cache_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_same_path_imports_once() {
        let path = write_temp("memo.obj", TRIANGLE);
        let mut cache = MeshCache::new();

        let first = cache.get_or_import(&path).unwrap();
        let second = cache.get_or_import(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.imports_performed(), 1);
        assert_eq!(cache.len(), 1);

        let entry = cache.lookup(first).unwrap();
        assert_eq!(entry.vertex_count(), 3);
        assert_eq!(entry.face_count(), 1);
        assert_eq!(entry.vertex_buffer().len(), 24);
        assert!(!entry.has_original_normals());
    }

    #[test]
    fn test_equivalent_paths_share_an_entry() {
        let path = write_temp("dots.obj", TRIANGLE);
        let dir = path.parent().unwrap();
        let dotted = dir.join(".").join("sub").join("..").join("dots.obj");
        let mut cache = MeshCache::new();

        let a = cache.get_or_import(&path).unwrap();
        let b = cache.get_or_import(&dotted).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.imports_performed(), 1);
    }

    #[test]
    fn test_failed_import_is_not_cached() {
        let mut cache = MeshCache::new();
        let missing = std::env::temp_dir().join("scenewright_missing_mesh.obj");

        assert!(matches!(cache.get_or_import(&missing), Err(Error::Import { .. })));
        assert!(cache.is_empty());
        assert_eq!(cache.handle_for(&missing), None);

        assert!(cache.get_or_import(&missing).is_err());
        assert_eq!(cache.imports_performed(), 2);
    }

    #[test]
    fn test_force_reload_appends_new_entry() {
        let path = write_temp("reload.obj", TRIANGLE);
        let mut cache = MeshCache::new();
        let old = cache.get_or_import(&path).unwrap();

        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        let new = cache.force_reload(&path).unwrap();

        assert_ne!(old, new);
        assert_eq!(cache.lookup(old).unwrap().triangle_count(), 1);
        assert_eq!(cache.lookup(new).unwrap().triangle_count(), 2);
        assert_eq!(cache.get_or_import(&path).unwrap(), new);
        assert_eq!(cache.imports_performed(), 2);
    }

    #[test]
    fn test_lookup_unknown_handle() {
        let cache = MeshCache::new();
        assert!(matches!(cache.lookup(MeshHandle(7)), Err(Error::MeshNotFound(_))));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c.obj")), PathBuf::from("a/c.obj"));
        assert_eq!(normalize_path(Path::new("../x.obj")), PathBuf::from("../x.obj"));
        assert_eq!(normalize_path(Path::new("Models/A.obj")), PathBuf::from("Models/A.obj"));
        assert_ne!(normalize_path(Path::new("a.obj")), normalize_path(Path::new("A.obj")));
    }
}
