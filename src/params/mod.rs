//! Parameter definitions with physical units and documented semantics.
//!
//! All tuning numbers are collected here with:
//! - Physical units (meters, degrees, etc.)
//! - Documented ranges and meanings
//! - A `validate` method that rejects values the generators cannot use

mod camera;
mod scatter;
mod scene;
mod terrain;

// Re-export all types
pub use camera::CameraParams;
pub use scatter::{CloudParams, GrassParams, PlantKind, PlantParams};
pub use scene::SceneConfig;
pub use terrain::TerrainParams;
