//! Meadowgen library - procedural terrain, vegetation scatter and camera math

pub mod camera;
pub mod cli;
pub mod error;
pub mod heightmap;
pub mod math;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod scatter;
pub mod scene;

pub use error::{GeometryError, Result};
