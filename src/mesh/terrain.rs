//! Height-field terrain mesh driven by fractal value noise.

use super::{Mesh, Vertex};
use crate::error::Result;
use crate::math::Vector3;
use crate::noise::{HeightSampler, NoiseField};
use crate::params::TerrainParams;

/// Build a terrain grid with the default sampling constants
/// (`k = 0.1`, persistence 0.5, 4 octaves).
///
/// # Arguments
/// * `world_size` - Edge length of the terrain square (meters)
/// * `resolution` - Vertices per axis, at least 2
/// * `height_scale` - Vertical amplitude (meters)
/// * `noise` - Noise field sampled for heights
pub fn build_height_field(
    world_size: f32,
    resolution: usize,
    height_scale: f32,
    noise: &NoiseField,
) -> Result<Mesh> {
    build_height_field_with(
        &TerrainParams::new(world_size, resolution, height_scale),
        noise,
    )
}

/// Build a `resolution x resolution` terrain grid spanning
/// `[-world_size/2, world_size/2]` on X and Z.
pub fn build_height_field_with(params: &TerrainParams, noise: &NoiseField) -> Result<Mesh> {
    params.validate()?;
    let sampler = params.sampler(*noise)?;

    let resolution = params.resolution;
    let size = params.world_size;
    let step = params.step();
    let half_size = size / 2.0;

    let mut vertices = Vec::with_capacity(resolution * resolution);
    let mut indices = Vec::with_capacity(6 * (resolution - 1) * (resolution - 1));

    // Generate height-mapped XZ grid, row by row along Z
    for z in 0..resolution {
        for x in 0..resolution {
            let x_pos = x as f32 * step - half_size;
            let z_pos = z as f32 * step - half_size;
            let height = sampler.height_at(x_pos, z_pos);

            vertices.push(Vertex {
                position: Vector3::new(x_pos, height, z_pos),
                // Greener and brighter with elevation
                color: Vector3::new(0.2, (0.6 + height * 0.1).clamp(0.0, 1.0), 0.2),
                normal: surface_normal(&sampler, x_pos, z_pos, step),
                tex_coord: Vector3::new(x_pos / size + 0.5, z_pos / size + 0.5, 0.0),
            });
        }
    }

    // Generate triangle indices (counter-clockwise seen from above)
    let row = resolution as u32;
    for z in 0..row - 1 {
        for x in 0..row - 1 {
            let top_left = z * row + x;
            let top_right = top_left + 1;
            let bottom_left = (z + 1) * row + x;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    Ok(Mesh::from_parts(vertices, indices))
}

/// Central-difference normal of the height function at `(x, z)`.
fn surface_normal(sampler: &HeightSampler, x: f32, z: f32, eps: f32) -> Vector3 {
    let left = sampler.height_at(x - eps, z);
    let right = sampler.height_at(x + eps, z);
    let back = sampler.height_at(x, z - eps);
    let front = sampler.height_at(x, z + eps);
    Vector3::new(left - right, 2.0 * eps, back - front).normalize()
}
