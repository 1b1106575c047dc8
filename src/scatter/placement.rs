//! Placement samplers: jittered grid and minimum-spacing rejection.
//!
//! Both take the caller's random draw (`FnMut() -> f32` returning values in
//! `[0, 1)`), so the noise stays deterministic while scatter can vary per run.

use super::{Bounds, InstanceSet};
use crate::error::{ensure_positive, GeometryError, Result};
use crate::math::{Matrix4, Vector3};
use crate::noise::HeightSampler;

/// Jittered-grid layout for [`place_on_grid`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Grid slots to fill; slot `i` sits in cell `(i % res, i / res)`
    pub count: usize,

    /// Edge length of the grid (meters), centered on the origin
    pub grid_size: f32,

    /// Cells per row
    pub grid_resolution: usize,

    /// Instances landing outside are dropped
    pub bounds: Bounds,

    /// Per-instance vertical scale
    pub height_range: (f32, f32),

    /// Per-instance auxiliary intensity
    pub intensity_range: (f32, f32),

    /// Tilt about X is drawn from `[-max, max]` (degrees)
    pub max_tilt_degrees: f32,
}

impl GridLayout {
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(GeometryError::InvalidGrid(
                "grid resolution must be at least 1".to_string(),
            ));
        }
        ensure_positive("grid size", self.grid_size)
    }

    pub fn cell_size(&self) -> f32 {
        self.grid_size / self.grid_resolution as f32
    }
}

fn lerp_range(range: (f32, f32), t: f32) -> f32 {
    range.0 + (range.1 - range.0) * t
}

/// Scatter instances over a jittered grid, standing on the ground.
///
/// Each slot is offset by a random fraction of a cell on X and Z, dropped if
/// it leaves `layout.bounds`, then given a random yaw, tilt and vertical
/// scale. The transform is `T(x, ground, z) · Ry(yaw) · Rx(tilt) · S(1, h, 1)`.
///
/// Draws per slot, in order: offset x, offset z, then for kept slots height,
/// intensity, yaw and tilt.
pub fn place_on_grid<F>(
    layout: &GridLayout,
    ground: &HeightSampler,
    draw: &mut F,
) -> Result<InstanceSet>
where
    F: FnMut() -> f32,
{
    layout.validate()?;

    let cell = layout.cell_size();
    let half = layout.grid_size / 2.0;
    let mut set = InstanceSet::with_capacity(layout.count);

    for i in 0..layout.count {
        let grid_x = i % layout.grid_resolution;
        let grid_z = i / layout.grid_resolution;

        // Random offset within the cell
        let x = grid_x as f32 * cell - half + draw() * cell;
        let z = grid_z as f32 * cell - half + draw() * cell;

        if !layout.bounds.contains(x, z) {
            continue;
        }

        let height = lerp_range(layout.height_range, draw());
        let intensity = lerp_range(layout.intensity_range, draw());
        let yaw = (draw() * 360.0).to_radians();
        let tilt = ((draw() * 2.0 - 1.0) * layout.max_tilt_degrees).to_radians();

        let transform = Matrix4::translation(x, ground.height_at(x, z), z)
            * Matrix4::rotation_y(yaw)
            * Matrix4::rotation_x(tilt)
            * Matrix4::scale(1.0, height, 1.0);

        set.push(transform, height, intensity);
    }

    Ok(set)
}

/// Rejection-sample up to `attempts` ground positions at least
/// `min_distance` apart on the XZ plane.
///
/// Returns accepted positions (with ground height) in acceptance order.
/// Fewer than `attempts` results is the normal outcome once the area fills
/// up. Cost is quadratic in accepted positions.
pub fn place_with_min_spacing<F>(
    attempts: usize,
    area: &Bounds,
    min_distance: f32,
    ground: &HeightSampler,
    draw: &mut F,
) -> Vec<Vector3>
where
    F: FnMut() -> f32,
{
    let min_distance_sq = min_distance * min_distance;
    let mut accepted: Vec<Vector3> = Vec::new();

    for _ in 0..attempts {
        let (x, z) = area.sample(draw);

        let too_close = accepted.iter().any(|p| {
            let dx = p.x - x;
            let dz = p.z - z;
            dx * dx + dz * dz < min_distance_sq
        });
        if too_close {
            continue;
        }

        accepted.push(Vector3::new(x, ground.height_at(x, z), z));
    }

    accepted
}
