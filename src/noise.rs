//! Deterministic 2D value noise for terrain height and placement.
//!
//! Everything here is a pure function of its inputs: the terrain mesh, the
//! instance placer and the camera ground clamp each sample the same heights
//! without sharing a precomputed grid.

use std::f32::consts::PI;
use std::num::NonZeroU32;

use ::noise::NoiseFn;

use crate::error::{GeometryError, Result};

/// World-to-noise coordinate scale used by the terrain (`k`).
pub const DEFAULT_SAMPLE_FREQUENCY: f32 = 0.1;

/// Amplitude falloff per octave.
pub const DEFAULT_PERSISTENCE: f32 = 0.5;

/// Octave count for terrain heights.
pub const DEFAULT_OCTAVES: u32 = 4;

/// Upper bound on octaves; the top octave samples at `2^31` times the base
/// frequency.
pub const MAX_OCTAVES: u32 = 32;

/// Seed-free lattice value noise. Stateless, so it is freely copied and
/// shared between threads.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoiseField;

impl NoiseField {
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-random value in `[-1, 1]` pinned to the integer lattice point.
    pub fn hash_noise(&self, ix: i32, iy: i32) -> f32 {
        let n = ix.wrapping_add(iy.wrapping_mul(57));
        let n = n.wrapping_shl(13) ^ n;
        let inner = n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221);
        let bits = n.wrapping_mul(inner).wrapping_add(1_376_312_589) & 0x7fff_ffff;
        1.0 - bits as f32 / 1_073_741_824.0
    }

    /// 3x3 weighted average around a lattice point (corners 1/16, edges 1/8,
    /// center 1/4).
    pub fn smooth_noise(&self, ix: i32, iy: i32) -> f32 {
        let h = |dx: i32, dy: i32| self.hash_noise(ix.wrapping_add(dx), iy.wrapping_add(dy));

        let corners = (h(-1, -1) + h(1, -1) + h(-1, 1) + h(1, 1)) / 16.0;
        let sides = (h(-1, 0) + h(1, 0) + h(0, -1) + h(0, 1)) / 8.0;
        let center = h(0, 0) / 4.0;
        corners + sides + center
    }

    /// Blend with `f = (1 - cos(t*pi)) / 2`; zero slope at both ends.
    pub fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
        let f = (1.0 - (t * PI).cos()) * 0.5;
        a * (1.0 - f) + b * f
    }

    /// Continuous noise at arbitrary real coordinates.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let ix = x0 as i32;
        let iy = y0 as i32;

        let v1 = self.smooth_noise(ix, iy);
        let v2 = self.smooth_noise(ix.wrapping_add(1), iy);
        let v3 = self.smooth_noise(ix, iy.wrapping_add(1));
        let v4 = self.smooth_noise(ix.wrapping_add(1), iy.wrapping_add(1));

        let i1 = Self::cosine_interpolate(v1, v2, fx);
        let i2 = Self::cosine_interpolate(v3, v4, fx);
        Self::cosine_interpolate(i1, i2, fy)
    }

    /// Octave sum normalized by the total amplitude, so the result stays in
    /// `[-1, 1]` for any octave count.
    ///
    /// Summing stops at the first octave whose coordinates or running
    /// amplitude would leave the finite range; a sum with no usable octave
    /// is 0.
    pub fn fractal(&self, x: f32, y: f32, persistence: f32, octaves: NonZeroU32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0_f32;
        let mut amplitude = 1.0_f32;
        let mut max_value = 0.0_f32;

        for _ in 0..octaves.get() {
            let (sx, sy) = (x * frequency, y * frequency);
            let next_max = max_value + amplitude.abs();
            if !(sx.is_finite() && sy.is_finite() && next_max.is_finite()) {
                break;
            }
            total += self.sample(sx, sy) * amplitude;
            max_value = next_max;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value > 0.0 {
            total / max_value
        } else {
            0.0
        }
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0] as f32, point[1] as f32) as f64
    }
}

/// A [`NoiseField`] with its fractal sampling constants fixed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalNoise {
    field: NoiseField,
    frequency: f32,
    persistence: f32,
    octaves: NonZeroU32,
}

impl FractalNoise {
    /// # Arguments
    /// * `frequency` - World-to-noise coordinate scale, `> 0`
    /// * `persistence` - Amplitude falloff per octave, `>= 0`
    /// * `octaves` - Number of layers, `1..=MAX_OCTAVES`
    pub fn new(field: NoiseField, frequency: f32, persistence: f32, octaves: u32) -> Result<Self> {
        if octaves > MAX_OCTAVES {
            return Err(GeometryError::TooManyOctaves(octaves));
        }
        let octaves = NonZeroU32::new(octaves).ok_or(GeometryError::InvalidOctaves)?;
        let top_frequency = frequency * 2.0_f32.powi(octaves.get() as i32 - 1);
        if !(frequency > 0.0 && top_frequency.is_finite()) {
            return Err(GeometryError::InvalidNoiseParameter(format!(
                "frequency must be positive and finite over {} octaves, got {}",
                octaves, frequency
            )));
        }
        if !(persistence.is_finite() && persistence >= 0.0) {
            return Err(GeometryError::InvalidNoiseParameter(format!(
                "persistence must be non-negative, got {}",
                persistence
            )));
        }
        let amplitude_sum: f32 = (0..octaves.get() as i32).map(|i| persistence.powi(i)).sum();
        if !amplitude_sum.is_finite() {
            return Err(GeometryError::InvalidNoiseParameter(format!(
                "persistence {} overflows over {} octaves",
                persistence, octaves
            )));
        }
        Ok(Self {
            field,
            frequency,
            persistence,
            octaves,
        })
    }

    /// Terrain defaults: `k = 0.1`, persistence 0.5, 4 octaves.
    pub fn terrain_default() -> Self {
        Self {
            field: NoiseField,
            frequency: DEFAULT_SAMPLE_FREQUENCY,
            persistence: DEFAULT_PERSISTENCE,
            octaves: NonZeroU32::new(DEFAULT_OCTAVES).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// Fractal value at world coordinates, in `[-1, 1]`.
    pub fn value(&self, x: f32, z: f32) -> f32 {
        self.field.fractal(
            x * self.frequency,
            z * self.frequency,
            self.persistence,
            self.octaves,
        )
    }

    pub fn octaves(&self) -> u32 {
        self.octaves.get()
    }
}

impl NoiseFn<f64, 2> for FractalNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.value(point[0] as f32, point[1] as f32) as f64
    }
}

/// Ground height at any world `(x, z)`: the one height function shared by
/// terrain, placement and camera clamping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeightSampler {
    fractal: FractalNoise,
    height_scale: f32,
}

impl HeightSampler {
    pub fn new(fractal: FractalNoise, height_scale: f32) -> Self {
        Self {
            fractal,
            height_scale,
        }
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.fractal.value(x, z) * self.height_scale
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    pub fn fractal(&self) -> &FractalNoise {
        &self.fractal
    }
}
