//! Wavefront OBJ import
//!
//! Converts OBJ files into the engine's non-indexed [`Vertex3D`] triangle
//! lists. Polygon faces are fan-triangulated here rather than by `tobj` so
//! each source face keeps a single flat normal when the file has none.

use std::io::BufRead;
use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use log::{info, warn};

use crate::error::{Error, Result};
use crate::gfx::scene::vertex::Vertex3D;

/// Geometry produced by a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMesh {
    pub vertices: Vec<Vertex3D>,
    /// Number of source faces (polygons), before triangulation
    pub face_count: usize,
    /// Whether any shape in the file carried its own normals
    pub has_normals: bool,
    /// Whether any shape in the file carried texture coordinates
    pub has_tex_coords: bool,
}

impl ImportedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Imports an OBJ file from disk
///
/// A missing or broken material library is logged and ignored.
pub fn import_obj(path: &Path) -> Result<ImportedMesh> {
    let (models, materials) =
        tobj::load_obj(path, &load_options()).map_err(|e| Error::import(path, e.to_string()))?;

    if let Err(e) = materials {
        warn!("No usable material library for '{}': {}", path.display(), e);
    }

    let mesh = build_mesh(path, &models)?;
    info!(
        "Imported '{}': {} faces, {} triangles{}",
        path.display(),
        mesh.face_count,
        mesh.triangle_count(),
        if mesh.has_normals { "" } else { " (flat normals generated)" }
    );
    Ok(mesh)
}

/// Imports OBJ text that is already in memory
///
/// `label` stands in for the file path in errors and logs. Material
/// libraries are never resolved.
pub fn import_obj_source(label: &Path, source: &str) -> Result<ImportedMesh> {
    let mut reader = source.as_bytes();
    import_obj_reader(label, &mut reader)
}

fn import_obj_reader<R: BufRead>(label: &Path, reader: &mut R) -> Result<ImportedMesh> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| Error::import(label, e.to_string()))?;

    build_mesh(label, &models)
}

fn build_mesh(path: &Path, models: &[tobj::Model]) -> Result<ImportedMesh> {
    if models.is_empty() {
        return Err(Error::import(path, "file contains no shapes"));
    }

    let mut mesh = ImportedMesh {
        vertices: Vec::new(),
        face_count: 0,
        has_normals: false,
        has_tex_coords: false,
    };

    for model in models {
        append_model(path, model, &mut mesh)?;
    }

    if mesh.vertices.is_empty() {
        return Err(Error::import(path, "file contains no triangle geometry"));
    }

    Ok(mesh)
}

/// Per-model attribute streams, with the optional ones disabled when their
/// index lists do not cover every face corner
struct Streams<'a> {
    mesh: &'a tobj::Mesh,
    normals: bool,
    tex_coords: bool,
}

impl<'a> Streams<'a> {
    fn new(mesh: &'a tobj::Mesh) -> Self {
        let corners = mesh.indices.len();
        Self {
            mesh,
            normals: !mesh.normals.is_empty() && mesh.normal_indices.len() == corners,
            tex_coords: !mesh.texcoords.is_empty() && mesh.texcoord_indices.len() == corners,
        }
    }

    fn position(&self, corner: usize) -> Option<Vector3<f32>> {
        let index = *self.mesh.indices.get(corner)? as usize;
        read3(&self.mesh.positions, index)
    }

    fn normal(&self, corner: usize) -> Option<Vector3<f32>> {
        let index = *self.mesh.normal_indices.get(corner)? as usize;
        read3(&self.mesh.normals, index)
    }

    fn tex_coord(&self, corner: usize) -> Option<[f32; 2]> {
        if !self.tex_coords {
            return Some([0.0, 0.0]);
        }
        let index = *self.mesh.texcoord_indices.get(corner)? as usize;
        let uv = self.mesh.texcoords.get(index * 2..index * 2 + 2)?;
        Some([uv[0], uv[1]])
    }
}

fn read3(values: &[f32], index: usize) -> Option<Vector3<f32>> {
    let v = values.get(index * 3..index * 3 + 3)?;
    Some(Vector3::new(v[0], v[1], v[2]))
}

fn append_model(path: &Path, model: &tobj::Model, out: &mut ImportedMesh) -> Result<()> {
    let streams = Streams::new(&model.mesh);
    out.has_normals |= streams.normals;
    out.has_tex_coords |= streams.tex_coords;

    // tobj leaves face_arities empty when every face is a triangle
    let corner_count = model.mesh.indices.len();
    let arities: Vec<usize> = if model.mesh.face_arities.is_empty() {
        vec![3; corner_count / 3]
    } else {
        model.mesh.face_arities.iter().map(|&a| a as usize).collect()
    };

    let out_of_range = || {
        Error::import(
            path,
            format!("shape '{}' references a vertex attribute that does not exist", model.name),
        )
    };

    let mut start = 0;
    let mut face = Vec::new();
    for arity in arities {
        let corners = start..start + arity;
        start += arity;
        if arity < 3 {
            continue;
        }

        face.clear();
        for corner in corners {
            let position = streams.position(corner).ok_or_else(out_of_range)?;
            let normal = if streams.normals {
                Some(streams.normal(corner).ok_or_else(out_of_range)?)
            } else {
                None
            };
            let tex_coords = streams.tex_coord(corner).ok_or_else(out_of_range)?;
            face.push((position, normal, tex_coords));
        }

        let flat = flat_normal(face[0].0, face[1].0, face[2].0);
        let vertex = |(position, normal, tex_coords): (Vector3<f32>, Option<Vector3<f32>>, [f32; 2])| {
            Vertex3D::new(position.into(), normal.unwrap_or(flat).into(), tex_coords)
        };

        for v in 1..arity - 1 {
            out.vertices.push(vertex(face[0]));
            out.vertices.push(vertex(face[v]));
            out.vertices.push(vertex(face[v + 1]));
        }
        out.face_count += 1;
    }

    Ok(())
}

/// Right-handed face normal `(p1 - p0) x (p2 - p0)`, normalized
///
/// Degenerate faces get +Y so lighting stays defined.
pub fn flat_normal(p0: Vector3<f32>, p1: Vector3<f32>, p2: Vector3<f32>) -> Vector3<f32> {
    let normal = (p1 - p0).cross(p2 - p0);
    if normal.magnitude2() > f32::EPSILON * f32::EPSILON {
        normal.normalize()
    } else {
        Vector3::unit_y()
    }
}
