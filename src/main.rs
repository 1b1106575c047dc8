//! Meadowgen - procedural meadow generator
//!
//! Builds the terrain, grass, plants and clouds for a scene and reports what
//! was generated. Optionally writes a top-down heightmap of the terrain noise.

use std::time::Instant;

use clap::Parser;
use log::info;

use meadowgen::camera::Camera;
use meadowgen::cli::Args;
use meadowgen::heightmap;
use meadowgen::noise::NoiseField;
use meadowgen::scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.scene_config();

    println!("Meadowgen - procedural meadow generator");
    println!("  Seed: {}", args.seed);
    println!(
        "  Terrain: {}m, {}x{} vertices, height scale {}m",
        config.terrain.world_size,
        config.terrain.resolution,
        config.terrain.resolution,
        config.terrain.height_scale
    );

    let start = Instant::now();
    let scene = Scene::generate(&config, args.seed)?;
    let stats = scene.stats();

    println!(
        "  Terrain: {} vertices, {} triangles",
        stats.terrain_vertices, stats.terrain_triangles
    );
    println!(
        "  Grass: {} of {} blades",
        stats.grass_instances, config.grass.count
    );
    println!(
        "  Plants: {} from {} attempts",
        stats.plant_instances, config.plants.attempts
    );
    for (kind, count) in scene
        .plants
        .kind_counts(config.plants.kinds.len())
        .iter()
        .enumerate()
    {
        info!("Plant kind {}: {}", kind, count);
    }
    println!("  Clouds: {}", stats.cloud_instances);

    let mut camera = Camera::new(&config.camera);
    if scene.clamp_camera_to_ground(&mut camera, config.camera.ground_clearance_m) {
        info!("Camera lifted above terrain to y = {:.2}", camera.position.y);
    }
    let view_proj = camera.projection_matrix()? * camera.view_matrix();
    info!("Initial view-projection: {:?}", view_proj.to_cols_array());

    if let Some(path) = &args.heightmap {
        let fractal = config.terrain.fractal(NoiseField::new())?;
        let img = heightmap::render(
            &fractal,
            args.heightmap_size,
            config.terrain.world_size as f64,
        )?;
        img.save(path)?;
        println!(
            "  Heightmap: {} ({}x{})",
            path.display(),
            args.heightmap_size,
            args.heightmap_size
        );
    }

    println!("  Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
