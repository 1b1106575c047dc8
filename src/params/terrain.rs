//! Terrain height-field parameters.

use crate::error::{ensure_positive, GeometryError, Result};
use crate::noise::{
    FractalNoise, HeightSampler, NoiseField, DEFAULT_OCTAVES, DEFAULT_PERSISTENCE,
    DEFAULT_SAMPLE_FREQUENCY,
};

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    /// Edge length of the generated square (meters); the grid spans
    /// `[-world_size/2, world_size/2]` on X and Z
    pub world_size: f32,

    /// Grid vertices per axis (at least 2)
    pub resolution: usize,

    /// Vertical amplitude multiplier (meters); heights stay in
    /// `[-height_scale, height_scale]`
    pub height_scale: f32,

    /// World-to-noise coordinate scale (`k`)
    pub sample_frequency: f32,

    /// Amplitude falloff per octave
    pub persistence: f32,

    /// Fractal octave count (at least 1)
    pub octaves: u32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            world_size: 100.0,
            resolution: 100,
            height_scale: 5.0, // Gentle rolling hills
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            persistence: DEFAULT_PERSISTENCE,
            octaves: DEFAULT_OCTAVES,
        }
    }
}

impl TerrainParams {
    /// Terrain with the default sampling constants.
    pub fn new(world_size: f32, resolution: usize, height_scale: f32) -> Self {
        Self {
            world_size,
            resolution,
            height_scale,
            ..Self::default()
        }
    }

    /// Validate configuration (resolution, sizes, noise constants)
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(GeometryError::InvalidResolution(self.resolution));
        }
        let vertex_count = self.resolution.checked_mul(self.resolution);
        if vertex_count.and_then(|n| u32::try_from(n).ok()).is_none() {
            return Err(GeometryError::InvalidSize(format!(
                "resolution {} exceeds 32-bit index range",
                self.resolution
            )));
        }
        ensure_positive("world size", self.world_size)?;
        if !self.height_scale.is_finite() {
            return Err(GeometryError::InvalidSize(format!(
                "height scale must be finite, got {}",
                self.height_scale
            )));
        }
        self.fractal(NoiseField::new()).map(|_| ())
    }

    pub fn fractal(&self, field: NoiseField) -> Result<FractalNoise> {
        FractalNoise::new(field, self.sample_frequency, self.persistence, self.octaves)
    }

    /// Ground height function matching the terrain mesh.
    pub fn sampler(&self, field: NoiseField) -> Result<HeightSampler> {
        Ok(HeightSampler::new(self.fractal(field)?, self.height_scale))
    }

    /// Distance between neighboring grid vertices (meters)
    pub fn step(&self) -> f32 {
        self.world_size / (self.resolution - 1) as f32
    }
}
