use std::fmt;
use std::path::PathBuf;

use cgmath::{Deg, Matrix4, Vector3};

use crate::gfx::resources::mesh_cache::MeshHandle;

/// Highest id a scene may hold; keeps ids representable in the signed
/// `parentId` field of scene files
pub const MAX_OBJECT_ID: u32 = i32::MAX as u32;

/// Identifier of a scene object, unique for the lifetime of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an object renders as. The discriminant is the persisted ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Cube = 0,
    Sphere = 1,
    Capsule = 2,
    ImportedMesh = 3,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Cube,
        ObjectType::Sphere,
        ObjectType::Capsule,
        ObjectType::ImportedMesh,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Base name used when the UI adds an object of this type
    pub fn default_name(self) -> &'static str {
        match self {
            ObjectType::Cube => "Cube",
            ObjectType::Sphere => "Sphere",
            ObjectType::Capsule => "Capsule",
            ObjectType::ImportedMesh => "Mesh",
        }
    }
}

/// Translation, Euler rotation in degrees, and non-uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Local model matrix: T * Rz * Ry * Rx * S
    ///
    /// Parent transforms are not composed in.
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_x(Deg(self.rotation.x));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

/// Reference from an imported-mesh object to its source file
///
/// `handle` is `None` while the mesh has not been resolved or failed to
/// import; the object stays in the scene as a broken reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRef {
    pub source_path: PathBuf,
    pub handle: Option<MeshHandle>,
}

impl MeshRef {
    pub fn new(source_path: impl Into<PathBuf>, handle: Option<MeshHandle>) -> Self {
        Self {
            source_path: source_path.into(),
            handle,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.handle.is_some()
    }
}

/// One node of the scene graph
///
/// Hierarchy links are read-only outside the graph; only
/// [`SceneGraph`](super::SceneGraph) may change them.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub(crate) id: ObjectId,
    pub name: String,
    pub(crate) object_type: ObjectType,
    pub transform: Transform,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) mesh: Option<MeshRef>,
}

impl SceneObject {
    pub(crate) fn new(id: ObjectId, name: String, object_type: ObjectType) -> Self {
        Self {
            id,
            name,
            object_type,
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            mesh: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Child ids in display order
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Mesh reference, present only for imported meshes
    pub fn mesh(&self) -> Option<&MeshRef> {
        self.mesh.as_ref()
    }

    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh.as_ref().and_then(|mesh| mesh.handle)
    }
}
