//! # Scene File Format
//!
//! Scenes are stored as line-oriented UTF-8 text:
//!
//! ```text
//! # Scene File
//! version=1
//! nextId=4
//! objectCount=2
//!
//! [Object]
//! id=1
//! name=Cube 1
//! type=0
//! parentId=-1
//! position=0,0,0
//! rotation=0,45,0
//! scale=1,1,1
//! children=3
//!
//! [Object]
//! id=3
//! name=Teapot 3
//! type=3
//! parentId=1
//! position=1.5,0,-2
//! rotation=0,0,0
//! scale=1,1,1
//! meshPath=models/teapot.obj
//! children=
//! ```
//!
//! `type` is the [`ObjectType`] ordinal and `parentId=-1` marks a root.
//! Reading is tolerant of unknown keys, blank lines and `#` comments, but any
//! malformed number rejects the whole file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use cgmath::Vector3;
use log::{info, warn};

use super::object::{MeshRef, ObjectId, ObjectType, SceneObject, MAX_OBJECT_ID};
use super::scene::{SceneGraph, SceneSnapshot};
use crate::error::{Error, Result};
use crate::gfx::resources::mesh_cache::MeshCache;

/// Newest format version this build reads and the one it writes
pub const SCENE_FORMAT_VERSION: u32 = 1;

const HEADER_LINE: &str = "# Scene File";
const OBJECT_MARKER: &str = "[Object]";

/// Writes the graph to `path`
pub fn save(path: &Path, graph: &SceneGraph) -> Result<()> {
    fs::write(path, to_scene_string(graph)).map_err(|e| Error::io(path, e))?;
    info!("Saved {} objects to '{}'", graph.len(), path.display());
    Ok(())
}

/// Renders the graph in the scene file format
pub fn to_scene_string(graph: &SceneGraph) -> String {
    let mut out = format!(
        "{}\nversion={}\nnextId={}\nobjectCount={}\n\n",
        HEADER_LINE,
        SCENE_FORMAT_VERSION,
        graph.next_id(),
        graph.len()
    );

    for object in graph.all_objects() {
        let parent_id = object
            .parent()
            .map(|parent| parent.to_string())
            .unwrap_or_else(|| "-1".to_string());

        out.push_str(OBJECT_MARKER);
        out.push('\n');
        out.push_str(&format!("id={}\n", object.id()));
        out.push_str(&format!("name={}\n", single_line(&object.name)));
        out.push_str(&format!("type={}\n", object.object_type().ordinal()));
        out.push_str(&format!("parentId={}\n", parent_id));
        out.push_str(&format!("position={}\n", format_vector(object.transform.position)));
        out.push_str(&format!("rotation={}\n", format_vector(object.transform.rotation)));
        out.push_str(&format!("scale={}\n", format_vector(object.transform.scale)));
        if let (ObjectType::ImportedMesh, Some(mesh)) = (object.object_type(), object.mesh()) {
            out.push_str(&format!("meshPath={}\n", single_line(&mesh.source_path.to_string_lossy())));
        }
        let children: Vec<String> = object.children().iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("children={}\n\n", children.join(",")));
    }
    out
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn format_vector(v: Vector3<f32>) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

/// Reads a scene file, resolving mesh paths through `cache`
///
/// Mesh imports that fail leave the object with a broken reference rather
/// than failing the load.
pub fn load(path: &Path, cache: &mut MeshCache) -> Result<SceneSnapshot> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let snapshot = parse(&text, cache)?;
    info!(
        "Loaded {} objects from '{}'",
        snapshot.objects.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Parses scene file text, resolving mesh paths through `cache`
///
/// Child ids that name no object in the file are kept as-is;
/// [`SceneGraph::from_snapshot`] repairs them.
pub fn parse(text: &str, cache: &mut MeshCache) -> Result<SceneSnapshot> {
    let mut header = Header::default();
    let mut objects: Vec<ObjectRecord> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let number = number + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == OBJECT_MARKER {
            if objects.is_empty() {
                header.validate(number)?;
            }
            objects.push(ObjectRecord::new(number));
            continue;
        }

        let (key, value) = raw
            .trim_end_matches('\r')
            .split_once('=')
            .ok_or_else(|| Error::parse(number, format!("expected key=value, found '{}'", trimmed)))?;
        let key = key.trim();

        match objects.last_mut() {
            Some(record) => record.apply(number, key, value)?,
            None => header.apply(number, key, value.trim())?,
        }
    }

    if objects.is_empty() {
        header.validate(0)?;
    }

    let declared = header.object_count;
    let mut snapshot = SceneSnapshot {
        objects: Vec::with_capacity(objects.len()),
        next_id: header.next_id.unwrap_or(1),
    };

    let mut seen = HashSet::new();
    for record in objects {
        let line = record.line;
        let object = record.into_object()?;
        if !seen.insert(object.id()) {
            return Err(Error::parse(line, format!("duplicate object id {}", object.id())));
        }
        snapshot.objects.push(object);
    }

    if let Some(declared) = declared {
        if declared != snapshot.objects.len() {
            warn!(
                "Scene header declares {} objects but {} were found",
                declared,
                snapshot.objects.len()
            );
        }
    }

    resolve_mesh_paths(&mut snapshot, cache);

    if let Some(highest) = snapshot.objects.iter().map(|o| o.id().0).max() {
        snapshot.next_id = snapshot.next_id.max(highest + 1);
    }
    Ok(snapshot)
}

fn resolve_mesh_paths(snapshot: &mut SceneSnapshot, cache: &mut MeshCache) {
    for object in &mut snapshot.objects {
        let id = object.id;
        if let Some(mesh) = object.mesh.as_mut() {
            match cache.get_or_import(&mesh.source_path) {
                Ok(handle) => mesh.handle = Some(handle),
                Err(e) => {
                    warn!("Object {} keeps a broken mesh reference: {}", id, e);
                    mesh.handle = None;
                }
            }
        }
    }
}

#[derive(Default)]
struct Header {
    version: Option<u32>,
    next_id: Option<u32>,
    object_count: Option<usize>,
}

impl Header {
    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<()> {
        match key {
            "version" => self.version = Some(parse_number(line, key, value)?),
            "nextId" => {
                let next_id: u32 = parse_number(line, key, value)?;
                if next_id > MAX_OBJECT_ID + 1 {
                    return Err(Error::parse(line, format!("nextId {} is out of range", next_id)));
                }
                self.next_id = Some(next_id);
            }
            "objectCount" => self.object_count = Some(parse_number(line, key, value)?),
            _ => {}
        }
        Ok(())
    }

    fn validate(&self, line: usize) -> Result<()> {
        let version = self
            .version
            .ok_or_else(|| Error::parse(line, "missing required header field 'version'"))?;
        if version == 0 || version > SCENE_FORMAT_VERSION {
            return Err(Error::parse(
                line,
                format!("unsupported scene version {} (newest supported is {})", version, SCENE_FORMAT_VERSION),
            ));
        }
        if self.next_id.is_none() {
            return Err(Error::parse(line, "missing required header field 'nextId'"));
        }
        Ok(())
    }
}

/// Fields of one `[Object]` block as they are read
struct ObjectRecord {
    line: usize,
    id: Option<u32>,
    object: SceneObject,
    object_type: Option<ObjectType>,
    mesh_path: Option<String>,
}

impl ObjectRecord {
    fn new(line: usize) -> Self {
        Self {
            line,
            id: None,
            object: SceneObject::new(ObjectId(0), String::new(), ObjectType::Cube),
            object_type: None,
            mesh_path: None,
        }
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<()> {
        match key {
            // Names are kept verbatim
            "name" => self.object.name = value.to_string(),
            "id" => self.id = Some(parse_object_id(line, key, value.trim())?),
            "type" => {
                let ordinal: u32 = parse_number(line, key, value.trim())?;
                let object_type = ObjectType::from_ordinal(ordinal)
                    .ok_or_else(|| Error::parse(line, format!("unknown object type {}", ordinal)))?;
                self.object_type = Some(object_type);
            }
            "parentId" => {
                let parent: i64 = parse_number(line, key, value.trim())?;
                self.object.parent = match parent {
                    -1 => None,
                    p if p >= 0 && p <= MAX_OBJECT_ID as i64 => Some(ObjectId(p as u32)),
                    p => return Err(Error::parse(line, format!("invalid parentId {}", p))),
                };
            }
            "position" => self.object.transform.position = parse_vector(line, key, value)?,
            "rotation" => self.object.transform.rotation = parse_vector(line, key, value)?,
            "scale" => self.object.transform.scale = parse_vector(line, key, value)?,
            "meshPath" => self.mesh_path = Some(value.trim().to_string()),
            "children" => {
                self.object.children = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| parse_object_id(line, key, s).map(ObjectId))
                    .collect::<Result<Vec<_>>>()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn into_object(self) -> Result<SceneObject> {
        let id = self
            .id
            .ok_or_else(|| Error::parse(self.line, "object block without an id"))?;
        let mut object = self.object;
        object.id = ObjectId(id);
        object.object_type = self.object_type.unwrap_or(ObjectType::Cube);
        if let Some(path) = self.mesh_path.filter(|p| !p.is_empty()) {
            if object.object_type == ObjectType::ImportedMesh {
                object.mesh = Some(MeshRef::new(path, None));
            } else {
                warn!("Ignoring meshPath '{}' on non-mesh object {}", path, object.id);
            }
        }
        Ok(object)
    }
}

fn parse_number<T: FromStr>(line: usize, key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid number '{}' for '{}'", value, key)))
}

fn parse_object_id(line: usize, key: &str, value: &str) -> Result<u32> {
    let id: u32 = parse_number(line, key, value)?;
    if id > MAX_OBJECT_ID {
        return Err(Error::parse(line, format!("object id {} is out of range", id)));
    }
    Ok(id)
}

fn parse_vector(line: usize, key: &str, value: &str) -> Result<Vector3<f32>> {
    let components = value
        .split(',')
        .map(|c| parse_number::<f32>(line, key, c.trim()))
        .collect::<Result<Vec<_>>>()?;
    match components.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(Error::parse(
            line,
            format!("'{}' needs three components, found {}", key, components.len()),
        )),
    }
}
