//! Parametric primitives: cube, plane and UV sphere.

use std::f32::consts::PI;

use super::{Mesh, Vertex};
use crate::error::{ensure_positive, GeometryError, Result};
use crate::math::Vector3;

/// Appends one quad centered on `center` spanning `±u` and `±v`.
///
/// `u × v` must point along `normal` so both triangles wind counter-clockwise
/// seen from outside.
fn push_quad(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    center: Vector3,
    u: Vector3,
    v: Vector3,
    normal: Vector3,
    color: Vector3,
) {
    let base = vertices.len() as u32;
    let corners = [
        (center - u - v, 0.0, 0.0),
        (center + u - v, 1.0, 0.0),
        (center + u + v, 1.0, 1.0),
        (center - u + v, 0.0, 1.0),
    ];
    for (position, s, t) in corners {
        vertices.push(Vertex {
            position,
            color,
            normal,
            tex_coord: Vector3::new(s, t, 0.0),
        });
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Axis-aligned cube centered on the origin with one flat-colored quad per face.
pub fn build_cube(size: f32) -> Result<Mesh> {
    ensure_positive("cube size", size)?;
    let h = size / 2.0;

    // (outward normal, u axis, v axis, color)
    let faces = [
        (Vector3::Z, Vector3::X, Vector3::Y, Vector3::new(1.0, 0.0, 0.0)),
        (-Vector3::Z, -Vector3::X, Vector3::Y, Vector3::new(0.0, 1.0, 0.0)),
        (Vector3::Y, Vector3::X, -Vector3::Z, Vector3::new(0.0, 0.0, 1.0)),
        (-Vector3::Y, Vector3::X, Vector3::Z, Vector3::new(1.0, 1.0, 0.0)),
        (Vector3::X, -Vector3::Z, Vector3::Y, Vector3::new(1.0, 0.0, 1.0)),
        (-Vector3::X, Vector3::Z, Vector3::Y, Vector3::new(0.0, 1.0, 1.0)),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v, color) in faces {
        push_quad(
            &mut vertices,
            &mut indices,
            normal * h,
            u * h,
            v * h,
            normal,
            color,
        );
    }

    Ok(Mesh::from_parts(vertices, indices))
}

/// Square in the XZ plane at `y = 0`, facing +Y.
pub fn build_plane(size: f32, color: Vector3) -> Result<Mesh> {
    ensure_positive("plane size", size)?;
    let h = size / 2.0;

    let mut vertices = Vec::with_capacity(4);
    let mut indices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        &mut indices,
        Vector3::ZERO,
        Vector3::X * h,
        -Vector3::Z * h,
        Vector3::Y,
        color,
    );

    Ok(Mesh::from_parts(vertices, indices))
}

/// Latitude/longitude sphere with Y as the pole axis.
///
/// The first and last stacks touch a pole, so they emit one triangle per
/// sector instead of two; no zero-area triangles are produced.
///
/// # Arguments
/// * `radius` - Sphere radius (meters)
/// * `sectors` - Longitude subdivisions, at least 3
/// * `stacks` - Latitude subdivisions, at least 2
pub fn build_sphere(radius: f32, sectors: usize, stacks: usize) -> Result<Mesh> {
    ensure_positive("sphere radius", radius)?;
    if sectors < 3 || stacks < 2 {
        return Err(GeometryError::InvalidTessellation(format!(
            "sphere needs at least 3 sectors and 2 stacks, got {} x {}",
            sectors, stacks
        )));
    }
    let vertex_count = (sectors + 1)
        .checked_mul(stacks + 1)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or_else(|| {
            GeometryError::InvalidTessellation(format!(
                "{} x {} sphere exceeds 32-bit index range",
                sectors, stacks
            ))
        })?;

    let mut vertices = Vec::with_capacity(vertex_count);
    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - i as f32 * PI / stacks as f32;
        let ring = radius * stack_angle.cos();
        let y = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * 2.0 * PI / sectors as f32;
            let position = Vector3::new(ring * sector_angle.sin(), y, ring * sector_angle.cos());

            vertices.push(Vertex {
                position,
                color: Vector3::new(
                    (position.x + radius) / (2.0 * radius),
                    (position.y + radius) / (2.0 * radius),
                    (position.z + radius) / (2.0 * radius),
                ),
                normal: position.normalize(),
                tex_coord: Vector3::new(j as f32 / sectors as f32, i as f32 / stacks as f32, 0.0),
            });
        }
    }

    let mut indices = Vec::with_capacity(6 * sectors * (stacks - 1));
    let row = (sectors + 1) as u32;
    for i in 0..stacks {
        let mut k1 = i as u32 * row;
        let mut k2 = k1 + row;

        for _ in 0..sectors {
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    Ok(Mesh::from_parts(vertices, indices))
}
