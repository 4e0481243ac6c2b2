use cgmath::Matrix4;
use log::trace;

use crate::config::PrimitiveConfig;
use crate::gfx::geometry::{generate_capsule, generate_cube, generate_sphere, GeometryData};
use crate::gfx::resources::mesh_cache::{MeshCache, MeshHandle};
use crate::gfx::scene::object::{ObjectId, ObjectType, SceneObject};
use crate::gfx::scene::scene::SceneGraph;
use crate::gfx::scene::vertex::Vertex3D;

/// Tessellated primitives, generated once per session
#[derive(Debug, Clone)]
pub struct PrimitiveMeshes {
    pub cube: GeometryData,
    pub sphere: GeometryData,
    pub capsule: GeometryData,
}

impl PrimitiveMeshes {
    pub fn new(config: &PrimitiveConfig) -> Self {
        Self {
            cube: generate_cube(),
            sphere: generate_sphere(config.sphere_segments, config.sphere_rings),
            capsule: generate_capsule(config.capsule_segments, config.capsule_rings),
        }
    }

    /// Geometry for a primitive type; `None` for imported meshes
    pub fn get(&self, object_type: ObjectType) -> Option<&GeometryData> {
        match object_type {
            ObjectType::Cube => Some(&self.cube),
            ObjectType::Sphere => Some(&self.sphere),
            ObjectType::Capsule => Some(&self.capsule),
            ObjectType::ImportedMesh => None,
        }
    }
}

impl Default for PrimitiveMeshes {
    fn default() -> Self {
        Self::new(&PrimitiveConfig::default())
    }
}

/// Where an object's vertices come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSource {
    Primitive(ObjectType),
    Imported(MeshHandle),
    /// Imported mesh whose file could not be loaded
    Unresolved,
}

impl MeshSource {
    fn of(object: &SceneObject) -> Self {
        match object.object_type() {
            ObjectType::ImportedMesh => object
                .mesh_handle()
                .map(MeshSource::Imported)
                .unwrap_or(MeshSource::Unresolved),
            primitive => MeshSource::Primitive(primitive),
        }
    }
}

/// One object as the renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub object_id: ObjectId,
    pub model_matrix: Matrix4<f32>,
    pub mesh: MeshSource,
}

/// Snapshot of everything to draw this frame, in scene order
pub fn build_draw_list(graph: &SceneGraph) -> Vec<DrawItem> {
    graph
        .all_objects()
        .iter()
        .map(|object| DrawItem {
            object_id: object.id(),
            model_matrix: object.transform.matrix(),
            mesh: MeshSource::of(object),
        })
        .collect()
}

/// Implemented by renderers that accept non-indexed triangle lists
pub trait DrawMesh {
    fn draw_mesh(&mut self, object_id: ObjectId, model_matrix: &Matrix4<f32>, vertices: &[Vertex3D]);
}

/// Feeds every drawable object to `renderer`
///
/// Unresolved and stale references are skipped. Returns the number of
/// objects drawn.
pub fn draw_scene<R: DrawMesh>(
    renderer: &mut R,
    graph: &SceneGraph,
    cache: &MeshCache,
    primitives: &PrimitiveMeshes,
) -> usize {
    let mut drawn = 0;
    for item in build_draw_list(graph) {
        let vertices = match item.mesh {
            MeshSource::Primitive(object_type) => primitives.get(object_type).map(|g| g.vertices.as_slice()),
            MeshSource::Imported(handle) => cache.lookup(handle).ok().map(|entry| entry.vertices()),
            MeshSource::Unresolved => None,
        };

        match vertices {
            Some(vertices) if !vertices.is_empty() => {
                renderer.draw_mesh(item.object_id, &item.model_matrix, vertices);
                drawn += 1;
            }
            _ => trace!("Nothing to draw for object {}", item.object_id),
        }
    }
    drawn
}
