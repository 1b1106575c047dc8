//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::heightmap;
use crate::params::SceneConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "meadowgen")]
#[command(about = "Procedural meadow generator: terrain, grass, plants and clouds", long_about = None)]
pub struct Args {
    /// RNG seed for instance placement
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Terrain edge length (meters)
    #[arg(long, value_name = "METERS")]
    pub world_size: Option<f32>,

    /// Terrain vertices per axis
    #[arg(long, value_name = "N")]
    pub resolution: Option<usize>,

    /// Terrain vertical amplitude (meters)
    #[arg(long, value_name = "METERS")]
    pub height_scale: Option<f32>,

    /// Grass grid slots to fill
    #[arg(long, value_name = "N")]
    pub grass_count: Option<usize>,

    /// Plant placement attempts
    #[arg(long, value_name = "N")]
    pub plant_count: Option<usize>,

    /// Minimum distance between plants (meters)
    #[arg(long, value_name = "METERS")]
    pub min_spacing: Option<f32>,

    /// Number of clouds
    #[arg(long, value_name = "N")]
    pub cloud_count: Option<usize>,

    /// Write a grayscale PNG of the terrain noise to this path
    #[arg(long, value_name = "PATH")]
    pub heightmap: Option<PathBuf>,

    /// Heightmap image size (width = height)
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 256,
        value_parser = clap::value_parser!(u32).range(2..=heightmap::MAX_SIZE as i64)
    )]
    pub heightmap_size: u32,
}

impl Args {
    /// Scene configuration with the command-line overrides applied
    pub fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();
        self.apply(&mut config);
        config
    }

    /// Overwrite the fields given on the command line
    pub fn apply(&self, config: &mut SceneConfig) {
        if let Some(world_size) = self.world_size {
            config.terrain.world_size = world_size;
        }
        if let Some(resolution) = self.resolution {
            config.terrain.resolution = resolution;
        }
        if let Some(height_scale) = self.height_scale {
            config.terrain.height_scale = height_scale;
        }
        if let Some(count) = self.grass_count {
            config.grass.count = count;
        }
        if let Some(attempts) = self.plant_count {
            config.plants.attempts = attempts;
        }
        if let Some(min_spacing) = self.min_spacing {
            config.plants.min_spacing = min_spacing;
        }
        if let Some(count) = self.cloud_count {
            config.clouds.count = count;
        }
    }
}
