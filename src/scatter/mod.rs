//! Instance placement: where grass, plants and clouds go.
//!
//! Placement consumes a caller-supplied random draw and the shared
//! [`HeightSampler`](crate::noise::HeightSampler); it never owns an RNG.

mod category;
mod placement;

use crate::math::{Matrix4, Vector3};

pub use category::{scatter_clouds, scatter_grass, scatter_plants};
pub use placement::{place_on_grid, place_with_min_spacing, GridLayout};

/// Axis-aligned rectangle on the XZ plane (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    /// Square `[-half_extent, half_extent]` on both axes.
    pub fn centered(half_extent: f32) -> Self {
        Self {
            min_x: -half_extent,
            max_x: half_extent,
            min_z: -half_extent,
            max_z: half_extent,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Uniform point inside; draws x first, then z.
    pub fn sample<F>(&self, draw: &mut F) -> (f32, f32)
    where
        F: FnMut() -> f32,
    {
        let x = self.min_x + draw() * (self.max_x - self.min_x);
        let z = self.min_z + draw() * (self.max_z - self.min_z);
        (x, z)
    }
}

/// Grid-placed instances with their per-instance attributes.
///
/// The three vectors are parallel: entry `i` of each belongs to instance `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceSet {
    pub transforms: Vec<Matrix4>,

    /// Vertical scale baked into each transform
    pub heights: Vec<f32>,

    /// Free per-instance multiplier (wind response for grass)
    pub intensities: Vec<f32>,
}

impl InstanceSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transforms: Vec::with_capacity(capacity),
            heights: Vec::with_capacity(capacity),
            intensities: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, transform: Matrix4, height: f32, intensity: f32) {
        self.transforms.push(transform);
        self.heights.push(height);
        self.intensities.push(intensity);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// World position of each instance (translation column).
    pub fn positions(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.transforms.iter().map(Matrix4::translation_part)
    }

    /// Transforms in column-major order, the layout GPU instance buffers expect.
    pub fn column_major(&self) -> Vec<[f32; 16]> {
        self.transforms.iter().map(Matrix4::to_cols_array).collect()
    }
}

/// Plants with the index of their [`PlantKind`](crate::params::PlantKind).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantSet {
    pub transforms: Vec<Matrix4>,
    pub kinds: Vec<usize>,
}

impl PlantSet {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Number of plants of each kind, indexed like the kind list.
    pub fn kind_counts(&self, kind_count: usize) -> Vec<usize> {
        let mut counts = vec![0; kind_count];
        for &kind in &self.kinds {
            if let Some(count) = counts.get_mut(kind) {
                *count += 1;
            }
        }
        counts
    }
}
