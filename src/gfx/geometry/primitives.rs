//! # Primitive Shape Generation
//!
//! This module contains functions to generate the editor's primitive shapes.
//! All shapes are generated with unit normals and texture coordinates.

use super::GeometryData;
use crate::gfx::scene::vertex::Vertex3D;
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Radius shared by the sphere and the capsule
pub const PRIMITIVE_RADIUS: f32 = 0.5;

/// Distance from the capsule center to each hemisphere center
pub const CAPSULE_HALF_HEIGHT: f32 = 0.5;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_cube() -> GeometryData {
    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    #[rustfmt::skip]
    let tex_coords: [[f32; 2]; 24] = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    let mut data = GeometryData::with_capacity(36);
    for (face, normal) in face_normals.iter().enumerate() {
        let base = face * 4;
        let corner = |i: usize| Vertex3D::new(positions[base + i], *normal, tex_coords[base + i]);

        // Two triangles per face, counter-clockwise
        data.push_triangle(corner(0), corner(1), corner(2));
        data.push_triangle(corner(2), corner(3), corner(0));
    }

    data
}

/// Generate a UV sphere of radius 0.5 centered at the origin
///
/// # Arguments
/// * `segments` - Number of longitude segments around the Y axis
/// * `rings` - Number of latitude bands from pole to pole
///
/// Produces `rings * segments * 2` triangles. Either argument being zero
/// yields empty geometry.
pub fn generate_sphere(segments: u32, rings: u32) -> GeometryData {
    if segments == 0 || rings == 0 {
        return GeometryData::new();
    }

    let mut grid = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32; // 0 to PI
        let v = ring as f32 / rings as f32;

        for seg in 0..=segments {
            let phi = seg as f32 * 2.0 * PI / segments as f32; // 0 to 2*PI
            let direction = unit_direction(theta, phi);
            let u = seg as f32 / segments as f32;

            grid.push(Vertex3D::new(
                (direction * PRIMITIVE_RADIUS).into(),
                direction.into(),
                [u, v],
            ));
        }
    }

    triangulate_grid(&grid, rings + 1, segments)
}

/// Generate a capsule of radius 0.5 whose hemisphere centers sit at y = ±0.5
///
/// The surface is built from `rings + 3` stacked rings: the top hemisphere
/// (rings `0..=rings/2`), two cylinder rings and the bottom hemisphere
/// (rings `rings/2+1..=rings`). Normals point away from the nearest point on
/// the capsule's spine; on the cylinder they are purely radial.
pub fn generate_capsule(segments: u32, rings: u32) -> GeometryData {
    if segments == 0 || rings == 0 {
        return GeometryData::new();
    }

    let half = rings / 2;
    let stacks = rings + 3;
    let top_spine = Vector3::new(0.0, CAPSULE_HALF_HEIGHT, 0.0);
    let bottom_spine = Vector3::new(0.0, -CAPSULE_HALF_HEIGHT, 0.0);

    let mut grid = Vec::with_capacity((stacks * (segments + 1)) as usize);
    let mut stack = 0u32;
    let mut push_ring = |grid: &mut Vec<Vertex3D>, ring_vertex: &dyn Fn(f32) -> (Vector3<f32>, Vector3<f32>)| {
        let v = stack as f32 / (stacks - 1) as f32;
        for seg in 0..=segments {
            let phi = seg as f32 * 2.0 * PI / segments as f32;
            let (position, normal) = ring_vertex(phi);
            let u = seg as f32 / segments as f32;
            grid.push(Vertex3D::new(position.into(), normal.into(), [u, v]));
        }
        stack += 1;
    };

    let hemisphere_vertex = |theta: f32, phi: f32, spine: Vector3<f32>| {
        let position = unit_direction(theta, phi) * PRIMITIVE_RADIUS + spine;
        (position, (position - spine).normalize())
    };

    for ring in 0..=half {
        let theta = ring as f32 * PI / rings as f32;
        push_ring(&mut grid, &|phi| hemisphere_vertex(theta, phi, top_spine));
    }

    for y in [CAPSULE_HALF_HEIGHT, -CAPSULE_HALF_HEIGHT] {
        push_ring(&mut grid, &|phi| {
            let radial = Vector3::new(phi.cos(), 0.0, phi.sin());
            let position = radial * PRIMITIVE_RADIUS + Vector3::new(0.0, y, 0.0);
            (position, radial)
        });
    }

    for ring in (half + 1)..=rings {
        let theta = ring as f32 * PI / rings as f32;
        push_ring(&mut grid, &|phi| hemisphere_vertex(theta, phi, bottom_spine));
    }

    triangulate_grid(&grid, stacks, segments)
}

/// Point on the unit sphere for polar angle `theta` and azimuth `phi`, Y up
fn unit_direction(theta: f32, phi: f32) -> Vector3<f32> {
    Vector3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
}

/// Splits every cell of a `stacks x (segments + 1)` vertex grid into two
/// triangles, duplicating vertices instead of indexing them.
fn triangulate_grid(grid: &[Vertex3D], stacks: u32, segments: u32) -> GeometryData {
    let cells = (stacks.saturating_sub(1) * segments) as usize;
    let mut data = GeometryData::with_capacity(cells * 6);
    let stride = segments + 1;

    for stack in 0..stacks.saturating_sub(1) {
        for seg in 0..segments {
            let first = (stack * stride + seg) as usize;
            let second = first + stride as usize;

            data.push_triangle(grid[first], grid[second], grid[first + 1]);
            data.push_triangle(grid[second], grid[second + 1], grid[first + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(data: &GeometryData) {
        for vertex in &data.vertices {
            let length = Vector3::from(vertex.normal).magnitude();
            assert!((length - 1.0).abs() < 1e-5, "normal length {}", length);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 36); // 6 faces * 2 triangles * 3 vertices
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.as_floats().len(), 36 * 8);
        assert_unit_normals(&cube);
    }

    #[test]
    fn test_sphere_counts_and_normals() {
        let sphere = generate_sphere(4, 2);
        assert_eq!(sphere.triangle_count(), 2 * 4 * 2);
        assert_eq!(sphere.vertex_count(), 2 * 4 * 6);
        assert_unit_normals(&sphere);

        for vertex in &sphere.vertices {
            let radius = Vector3::from(vertex.position).magnitude();
            assert!((radius - PRIMITIVE_RADIUS).abs() < 1e-5);
            assert!(vertex.tex_coords.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn test_sphere_first_cell_winding() {
        let sphere = generate_sphere(4, 2);
        // First vertex is the north pole, second comes from the next ring
        assert_eq!(sphere.vertices[0].tex_coords, [0.0, 0.0]);
        assert_eq!(sphere.vertices[1].tex_coords, [0.0, 0.5]);
        assert_eq!(sphere.vertices[2].tex_coords, [0.25, 0.0]);
        assert!((sphere.vertices[0].position[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_arguments_are_empty() {
        assert!(generate_sphere(0, 8).is_empty());
        assert!(generate_sphere(8, 0).is_empty());
        assert!(generate_capsule(0, 8).is_empty());
        assert!(generate_capsule(8, 0).is_empty());
    }

    #[test]
    fn test_capsule_generation() {
        let (segments, rings) = (8, 4);
        let capsule = generate_capsule(segments, rings);
        let expected_cells = (rings + 2) * segments;

        assert_eq!(capsule.vertex_count(), (expected_cells * 6) as usize);
        assert_unit_normals(&capsule);

        let top = capsule
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        let bottom = capsule
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        assert!((top - 1.0).abs() < 1e-5);
        assert!((bottom + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_capsule_body_normals_are_radial() {
        let capsule = generate_capsule(8, 4);
        for vertex in &capsule.vertices {
            if vertex.position[1].abs() < CAPSULE_HALF_HEIGHT - 1e-4 {
                panic!("no vertex should lie strictly inside the body band");
            }
        }
        let body: Vec<_> = capsule
            .vertices
            .iter()
            .filter(|v| (v.position[1].abs() - CAPSULE_HALF_HEIGHT).abs() < 1e-6)
            .collect();
        assert!(!body.is_empty());
        for vertex in body {
            assert!(vertex.normal[1].abs() < 1e-5);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_capsule(6, 5), generate_capsule(6, 5));
        assert_eq!(generate_sphere(6, 5), generate_sphere(6, 5));
    }
}
