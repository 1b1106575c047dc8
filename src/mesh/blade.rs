//! Curved, tapering blade used for grass and (scaled) small plants.

use std::f32::consts::PI;

use super::{Mesh, Vertex};
use crate::error::{ensure_positive, GeometryError, Result};
use crate::math::Vector3;

/// Base blade color; rows brighten from 70% at the root to 100% at the tip.
const BASE_COLOR: Vector3 = Vector3::new(0.0, 0.8, 0.0);

/// How far the blade bows along +Z at mid-height (meters).
const CURVE_DEPTH: f32 = 0.1;

/// Builds a blade standing on the origin, rising along +Y and facing +Z.
///
/// Row `i` sits at `t = i / segments` with half-width `width/2 * (1 - t)`,
/// so the strip narrows to a single tip vertex. The last segment is one
/// triangle.
///
/// Vertex count is `2 * segments + 1`, index count `6 * segments - 3`.
pub fn build_blade(segments: usize, width: f32, height: f32) -> Result<Mesh> {
    if segments == 0 {
        return Err(GeometryError::InvalidTessellation(
            "blade needs at least one segment".to_string(),
        ));
    }
    ensure_positive("blade width", width)?;
    ensure_positive("blade height", height)?;

    let mut vertices = Vec::with_capacity(2 * segments + 1);
    let mut indices = Vec::with_capacity(6 * segments - 3);

    for i in 0..segments {
        let t = i as f32 / segments as f32;
        let half_width = width / 2.0 * (1.0 - t);
        let y = height * t;
        let curve = (t * PI).sin() * CURVE_DEPTH;
        let color = BASE_COLOR * (0.7 + t * 0.3);
        let normal = curve_normal(t, height);

        vertices.push(Vertex {
            position: Vector3::new(-half_width, y, curve),
            color,
            normal,
            tex_coord: Vector3::new(0.0, t, 0.0),
        });
        vertices.push(Vertex {
            position: Vector3::new(half_width, y, curve),
            color,
            normal,
            tex_coord: Vector3::new(1.0, t, 0.0),
        });
    }

    // sin(pi) is not exactly 0 in f32; the tip sits back on the stem axis
    vertices.push(Vertex {
        position: Vector3::new(0.0, height, 0.0),
        color: BASE_COLOR,
        normal: curve_normal(1.0, height),
        tex_coord: Vector3::new(0.5, 1.0, 0.0),
    });

    for i in 0..segments as u32 - 1 {
        let left = 2 * i;
        let right = left + 1;
        let next_left = left + 2;
        let next_right = left + 3;
        indices.extend_from_slice(&[left, right, next_right, left, next_right, next_left]);
    }
    let last = 2 * (segments as u32 - 1);
    indices.extend_from_slice(&[last, last + 1, 2 * segments as u32]);

    Ok(Mesh::from_parts(vertices, indices))
}

/// Normal of the bowed center line at `t`: across-axis × tangent.
fn curve_normal(t: f32, height: f32) -> Vector3 {
    let tangent = Vector3::new(0.0, height, CURVE_DEPTH * PI * (t * PI).cos());
    Vector3::X.cross(tangent).normalize()
}
