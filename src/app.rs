use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use log::{info, warn};

use crate::config::EditorConfig;
use crate::gfx::rendering::{build_draw_list, draw_scene, DrawItem, DrawMesh, PrimitiveMeshes};
use crate::gfx::resources::MeshCache;
use crate::gfx::scene::{serializer, ObjectId, ObjectType, SceneGraph, SceneStatistics};
use crate::project::{Project, RecentProjects};

/// One open editor: the scene being edited and the resources it uses
///
/// The session owns the only [`MeshCache`] and lends it to the scene graph
/// and renderer. Scene mutations flag the shared [`Project`] as unsaved
/// through the graph's change callback.
pub struct EditorSession {
    config: EditorConfig,
    scene: SceneGraph,
    meshes: MeshCache,
    primitives: PrimitiveMeshes,
    project: Rc<RefCell<Project>>,
    recent: RecentProjects,
}

impl EditorSession {
    /// Create a session with an empty scene
    pub fn new(config: EditorConfig, project: Project) -> Self {
        let primitives = PrimitiveMeshes::new(&config.primitives);
        let project = Rc::new(RefCell::new(project));
        let recent = RecentProjects::new(config.recent_projects_limit);
        let mut session = Self {
            config,
            scene: SceneGraph::new(),
            meshes: MeshCache::new(),
            primitives,
            project,
            recent,
        };
        session.watch_scene();
        session
    }

    /// Installs the logger with the configured default filter
    pub fn init_logging(&self) {
        crate::logging::init_logging(&self.config.log_filter);
    }

    fn watch_scene(&mut self) {
        let project = Rc::clone(&self.project);
        self.scene
            .set_change_callback(move |_| project.borrow_mut().mark_dirty());
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable access for UI handlers (transform edits, reparenting, ...)
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn meshes(&self) -> &MeshCache {
        &self.meshes
    }

    pub fn primitives(&self) -> &PrimitiveMeshes {
        &self.primitives
    }

    /// Shared handle to the project; the scene graph writes its dirty flag
    pub fn project(&self) -> Rc<RefCell<Project>> {
        Rc::clone(&self.project)
    }

    pub fn recent_projects(&self) -> &RecentProjects {
        &self.recent
    }

    /// Replaces the recent projects list with the one stored at `path`
    pub fn load_recent_projects(&mut self, path: &Path) -> anyhow::Result<()> {
        self.recent = RecentProjects::load(path, self.config.recent_projects_limit)
            .with_context(|| format!("Reading recent projects from '{}' failed", path.display()))?;
        Ok(())
    }

    pub fn save_recent_projects(&self, path: &Path) -> anyhow::Result<()> {
        self.recent
            .save(path)
            .with_context(|| format!("Writing recent projects to '{}' failed", path.display()))
    }

    /// Writes the project file and moves it to the top of the recent list
    pub fn save_project(&mut self, path: &Path) -> anyhow::Result<()> {
        let project = self.project.borrow();
        project
            .save(path)
            .with_context(|| format!("Saving project to '{}' failed", path.display()))?;
        self.recent.touch(&project.name, path);
        Ok(())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.project.borrow().has_unsaved_changes()
    }

    pub fn add_primitive(&mut self, object_type: ObjectType) -> ObjectId {
        self.scene.add_object(object_type, object_type.default_name())
    }

    /// Duplicates using the configured offset
    pub fn duplicate(&mut self, id: ObjectId) -> crate::Result<ObjectId> {
        self.scene.duplicate_with_offset(id, self.config.duplicate_offset)
    }

    /// Imports a mesh file and adds it to the scene as a new root object
    ///
    /// On failure the scene is left untouched and the error is returned for
    /// the UI to show.
    pub fn import_mesh(&mut self, path: &Path) -> anyhow::Result<ObjectId> {
        let handle = self
            .meshes
            .get_or_import(path)
            .with_context(|| format!("Could not add mesh '{}' to the scene", path.display()))?;

        let base_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| ObjectType::ImportedMesh.default_name().to_string());
        Ok(self.scene.add_imported_mesh(&base_name, path, Some(handle)))
    }

    /// Writes the scene and records it as the project's last scene
    pub fn save_scene(&mut self, path: &Path) -> anyhow::Result<()> {
        serializer::save(path, &self.scene)
            .with_context(|| format!("Saving scene to '{}' failed", path.display()))?;

        self.scene.mark_saved();
        let mut project = self.project.borrow_mut();
        project.last_scene = Some(path.to_path_buf());
        project.mark_saved();
        Ok(())
    }

    /// Replaces the current scene with the one stored at `path`
    ///
    /// A scene that fails to parse leaves the current scene in place.
    pub fn open_scene(&mut self, path: &Path) -> anyhow::Result<()> {
        let snapshot = serializer::load(path, &mut self.meshes)
            .with_context(|| format!("Opening scene '{}' failed", path.display()))?;

        self.scene = SceneGraph::from_snapshot(snapshot);
        self.watch_scene();

        let broken = self.statistics().broken_mesh_references;
        if broken > 0 {
            warn!("{} objects reference meshes that could not be loaded", broken);
        }
        info!("Opened scene '{}' ({} objects)", path.display(), self.scene.len());

        let mut project = self.project.borrow_mut();
        project.last_scene = Some(path.to_path_buf());
        project.mark_saved();
        Ok(())
    }

    /// Discards the current scene; counts as an unsaved change
    pub fn new_scene(&mut self) {
        self.scene = SceneGraph::new();
        self.watch_scene();
        self.project.borrow_mut().mark_dirty();
    }

    /// Retries broken mesh references, e.g. after files were restored
    pub fn resolve_meshes(&mut self) -> usize {
        self.scene.resolve_meshes(&mut self.meshes)
    }

    pub fn draw_list(&self) -> Vec<DrawItem> {
        build_draw_list(&self.scene)
    }

    /// Hands every drawable object to `renderer`, returns how many were drawn
    pub fn render<R: DrawMesh>(&self, renderer: &mut R) -> usize {
        draw_scene(renderer, &self.scene, &self.meshes, &self.primitives)
    }

    pub fn statistics(&self) -> SceneStatistics {
        self.scene.statistics(&self.meshes)
    }
}
