//! Scatter parameters for grass, plants and clouds.

use crate::error::{ensure_positive, GeometryError, Result};
use crate::math::Vector3;

fn ensure_range(name: &str, range: (f32, f32)) -> Result<()> {
    if range.0.is_finite() && range.1.is_finite() && range.0 <= range.1 {
        Ok(())
    } else {
        Err(GeometryError::InvalidSize(format!(
            "{} range must be finite and ordered, got {:?}",
            name, range
        )))
    }
}

/// Grass field: jittered-grid placement of blade instances
#[derive(Debug, Clone, PartialEq)]
pub struct GrassParams {
    /// Number of grid slots to fill (instances outside the bounds are dropped)
    pub count: usize,

    /// Edge length of the placement grid (meters), centered on the origin
    pub grid_size: f32,

    /// Grid cells per row
    pub grid_resolution: usize,

    /// Blades with `|x|` or `|z|` beyond this are discarded (meters)
    pub bounds_half_extent: f32,

    /// Blade mesh segments
    pub blade_segments: usize,

    /// Blade base width (meters)
    pub blade_width: f32,

    /// Blade mesh height before per-instance scaling (meters)
    pub blade_height: f32,

    /// Per-instance vertical scale
    pub height_range: (f32, f32),

    /// Per-instance wind response multiplier
    pub intensity_range: (f32, f32),

    /// Maximum forward tilt either way (degrees)
    pub max_tilt_degrees: f32,
}

impl Default for GrassParams {
    fn default() -> Self {
        Self {
            count: 10_000,
            grid_size: 80.0,
            grid_resolution: 100, // 100 x 100 slots cover the grid exactly
            bounds_half_extent: 40.0,
            blade_segments: 4,
            blade_width: 0.2,
            blade_height: 1.0,
            height_range: (0.8, 1.2),
            intensity_range: (0.8, 1.2),
            max_tilt_degrees: 10.0,
        }
    }
}

impl GrassParams {
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution == 0 {
            return Err(GeometryError::InvalidGrid(
                "grid resolution must be at least 1".to_string(),
            ));
        }
        if self.blade_segments == 0 {
            return Err(GeometryError::InvalidTessellation(
                "grass blade needs at least one segment".to_string(),
            ));
        }
        ensure_positive("grass grid size", self.grid_size)?;
        ensure_positive("grass bounds", self.bounds_half_extent)?;
        ensure_positive("blade width", self.blade_width)?;
        ensure_positive("blade height", self.blade_height)?;
        ensure_range("blade height", self.height_range)?;
        ensure_range("intensity", self.intensity_range)?;
        if !(self.max_tilt_degrees.is_finite() && self.max_tilt_degrees >= 0.0) {
            return Err(GeometryError::InvalidSize(format!(
                "max tilt must be non-negative, got {}",
                self.max_tilt_degrees
            )));
        }
        Ok(())
    }
}

/// One plant variety; plants reuse the blade mesh scaled per kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantKind {
    /// Vertical scale applied to the blade mesh
    pub height: f32,

    /// Tint the renderer applies to this kind
    pub color: Vector3,

    /// Horizontal scale applied to the blade mesh
    pub scale: f32,
}

/// Sparse plants: rejection sampling with a minimum spacing
#[derive(Debug, Clone, PartialEq)]
pub struct PlantParams {
    /// Placement attempts (accepted plants can be fewer)
    pub attempts: usize,

    /// Plants are sampled in `[-half_extent, half_extent]` on X and Z (meters)
    pub area_half_extent: f32,

    /// Minimum XZ distance between two plants (meters)
    pub min_spacing: f32,

    /// Varieties picked uniformly per plant
    pub kinds: Vec<PlantKind>,
}

impl Default for PlantParams {
    fn default() -> Self {
        Self {
            attempts: 200,
            area_half_extent: 40.0,
            min_spacing: 2.0,
            kinds: vec![
                // Small bush
                PlantKind {
                    height: 0.3,
                    color: Vector3::new(0.2, 0.8, 0.2),
                    scale: 0.5,
                },
                // Red flower
                PlantKind {
                    height: 0.4,
                    color: Vector3::new(0.8, 0.2, 0.2),
                    scale: 0.3,
                },
                // Blue flower
                PlantKind {
                    height: 0.5,
                    color: Vector3::new(0.2, 0.2, 0.8),
                    scale: 0.4,
                },
                // Yellow flower
                PlantKind {
                    height: 0.6,
                    color: Vector3::new(0.8, 0.8, 0.2),
                    scale: 0.6,
                },
            ],
        }
    }
}

impl PlantParams {
    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(GeometryError::InvalidSize(
                "at least one plant kind is required".to_string(),
            ));
        }
        ensure_positive("plant area", self.area_half_extent)?;
        if !(self.min_spacing.is_finite() && self.min_spacing >= 0.0) {
            return Err(GeometryError::InvalidSize(format!(
                "plant spacing must be non-negative, got {}",
                self.min_spacing
            )));
        }
        Ok(())
    }
}

/// Cloud layer: flat planes scattered at altitude
#[derive(Debug, Clone, PartialEq)]
pub struct CloudParams {
    /// Number of clouds
    pub count: usize,

    /// Mean cloud altitude (meters)
    pub altitude_m: f32,

    /// Altitude varies by up to this much either way (meters)
    pub altitude_jitter_m: f32,

    /// Clouds are spread over `[-half_extent, half_extent]` on X and Z (meters)
    pub spread_half_extent: f32,

    /// Edge length of the cloud plane mesh (meters)
    pub size_m: f32,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            count: 20,
            altitude_m: 100.0,
            altitude_jitter_m: 10.0,
            spread_half_extent: 50.0,
            size_m: 50.0,
        }
    }
}

impl CloudParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("cloud size", self.size_m)?;
        ensure_positive("cloud spread", self.spread_half_extent)?;
        if !(self.altitude_m.is_finite()
            && self.altitude_jitter_m.is_finite()
            && self.altitude_jitter_m >= 0.0)
        {
            return Err(GeometryError::InvalidSize(format!(
                "cloud altitude {} +/- {} is invalid",
                self.altitude_m, self.altitude_jitter_m
            )));
        }
        Ok(())
    }
}
