//! One-shot scene generation: terrain, shared meshes and every instance set.

use std::fmt;
use std::panic;
use std::thread;
use std::time::Instant;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::camera::Camera;
use crate::error::Result;
use crate::math::Vector3;
use crate::mesh::{build_blade, build_height_field_with, build_plane, Mesh};
use crate::noise::{HeightSampler, NoiseField};
use crate::params::SceneConfig;
use crate::scatter::{scatter_clouds, scatter_grass, scatter_plants, InstanceSet, PlantSet};

/// Cloud planes are drawn white; the renderer tints them.
const CLOUD_COLOR: Vector3 = Vector3::new(1.0, 1.0, 1.0);

/// Generated geometry, immutable once built.
///
/// Terrain heights depend only on the terrain parameters; the seed drives
/// scatter alone, so two seeds share the same landscape.
#[derive(Debug, Clone)]
pub struct Scene {
    pub terrain: Mesh,

    /// Shared by grass and plants
    pub blade: Mesh,

    pub cloud: Mesh,
    pub grass: InstanceSet,
    pub plants: PlantSet,
    pub clouds: InstanceSet,
    ground: HeightSampler,
}

/// Everything generated on the caller thread
struct Population {
    blade: Mesh,
    cloud: Mesh,
    grass: InstanceSet,
    plants: PlantSet,
    clouds: InstanceSet,
}

/// Counts for logging and the CLI summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStats {
    pub terrain_vertices: usize,
    pub terrain_triangles: usize,
    pub grass_instances: usize,
    pub plant_instances: usize,
    pub cloud_instances: usize,
}

impl fmt::Display for SceneStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "terrain {} verts / {} tris, {} grass, {} plants, {} clouds",
            self.terrain_vertices,
            self.terrain_triangles,
            self.grass_instances,
            self.plant_instances,
            self.cloud_instances
        )
    }
}

impl Scene {
    /// Validate `config` and generate everything.
    ///
    /// The terrain mesh is built on a scoped worker thread while this thread
    /// builds the shared meshes and runs placement from a `Pcg64Mcg` seeded
    /// with `seed`. Both sides sample the same stateless noise.
    pub fn generate(config: &SceneConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let started = Instant::now();

        let field = NoiseField::new();
        let ground = config.terrain.sampler(field)?;

        let (terrain, placed) = thread::scope(|scope| {
            let terrain_job = scope.spawn(|| build_height_field_with(&config.terrain, &field));
            let placed = Self::populate(config, &ground, seed);
            let terrain = terrain_job
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            (terrain, placed)
        });
        let terrain = terrain?;
        let placed = placed?;

        let scene = Self {
            terrain,
            blade: placed.blade,
            cloud: placed.cloud,
            grass: placed.grass,
            plants: placed.plants,
            clouds: placed.clouds,
            ground,
        };
        info!(
            "Generated scene (seed {}) in {:.1}ms: {}",
            seed,
            started.elapsed().as_secs_f64() * 1000.0,
            scene.stats()
        );
        Ok(scene)
    }

    /// Caller-thread half of generation: shared meshes and instance sets.
    fn populate(config: &SceneConfig, ground: &HeightSampler, seed: u64) -> Result<Population> {
        let grass_params = &config.grass;
        let blade = build_blade(
            grass_params.blade_segments,
            grass_params.blade_width,
            grass_params.blade_height,
        )?;
        let cloud = build_plane(config.clouds.size_m, CLOUD_COLOR)?;
        debug!(
            "Blade mesh {} verts, cloud mesh {} verts",
            blade.vertex_count(),
            cloud.vertex_count()
        );

        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let mut draw = || rng.random::<f32>();

        let grass = scatter_grass(grass_params, ground, &mut draw)?;
        let plants = scatter_plants(&config.plants, ground, &mut draw)?;
        let clouds = scatter_clouds(&config.clouds, &mut draw)?;

        Ok(Population {
            blade,
            cloud,
            grass,
            plants,
            clouds,
        })
    }

    /// Terrain height at world `(x, z)`, also off the generated grid.
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.ground.height_at(x, z)
    }

    pub fn ground(&self) -> &HeightSampler {
        &self.ground
    }

    /// Lift `camera` so its eye stays `clearance` above the terrain.
    ///
    /// Returns `true` if the camera was moved.
    pub fn clamp_camera_to_ground(&self, camera: &mut Camera, clearance: f32) -> bool {
        let floor = self.ground_height(camera.position.x, camera.position.z) + clearance;
        if camera.position.y < floor {
            camera.position.y = floor;
            true
        } else {
            false
        }
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            terrain_vertices: self.terrain.vertex_count(),
            terrain_triangles: self.terrain.triangle_count(),
            grass_instances: self.grass.len(),
            plant_instances: self.plants.len(),
            cloud_instances: self.clouds.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::params::TerrainParams;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.terrain = TerrainParams::new(40.0, 21, 3.0);
        config.grass.count = 400;
        config.grass.grid_size = 20.0;
        config.grass.grid_resolution = 20;
        config.grass.bounds_half_extent = 10.0;
        config.plants.attempts = 50;
        config.plants.area_half_extent = 15.0;
        config.clouds.count = 5;
        config
    }

    #[test]
    fn test_generate_small_scene() {
        let scene = Scene::generate(&small_config(), 42).unwrap();
        let stats = scene.stats();

        assert_eq!(stats.terrain_vertices, 21 * 21);
        assert_eq!(stats.terrain_triangles, 2 * 20 * 20);
        assert_eq!(stats.grass_instances, 400);
        assert!(stats.plant_instances > 0 && stats.plant_instances <= 50);
        assert_eq!(stats.cloud_instances, 5);
        assert_eq!(scene.blade.vertex_count(), 9);
        assert_eq!(scene.cloud.vertex_count(), 4);
    }

    #[test]
    fn test_terrain_matches_ground() {
        let scene = Scene::generate(&small_config(), 1).unwrap();
        for v in scene.terrain.vertices() {
            let p = v.position;
            assert_eq!(p.y, scene.ground_height(p.x, p.z));
        }
        for p in scene.grass.positions() {
            assert_eq!(p.y, scene.ground_height(p.x, p.z));
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let config = small_config();
        let a = Scene::generate(&config, 7).unwrap();
        let b = Scene::generate(&config, 7).unwrap();
        assert_eq!(a.grass, b.grass);
        assert_eq!(a.plants, b.plants);
        assert_eq!(a.clouds, b.clouds);
        assert_eq!(a.terrain, b.terrain);

        let c = Scene::generate(&config, 8).unwrap();
        assert_ne!(a.grass, c.grass);
        assert_eq!(a.terrain, c.terrain);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = small_config();
        config.terrain.resolution = 1;
        assert_eq!(
            Scene::generate(&config, 0).err(),
            Some(GeometryError::InvalidResolution(1))
        );

        let mut config = small_config();
        config.terrain.octaves = 0;
        assert_eq!(
            Scene::generate(&config, 0).err(),
            Some(GeometryError::InvalidOctaves)
        );
    }

    #[test]
    fn test_clamp_camera_to_ground() {
        let scene = Scene::generate(&small_config(), 3).unwrap();
        let mut camera = Camera::default();

        camera.position = Vector3::new(2.0, -100.0, 3.0);
        assert!(scene.clamp_camera_to_ground(&mut camera, 1.0));
        assert_eq!(camera.position.y, scene.ground_height(2.0, 3.0) + 1.0);

        camera.position.y = 50.0;
        assert!(!scene.clamp_camera_to_ground(&mut camera, 1.0));
        assert_eq!(camera.position.y, 50.0);
    }

    #[test]
    fn test_stats_display() {
        let stats = SceneStats {
            terrain_vertices: 100,
            terrain_triangles: 162,
            grass_instances: 3,
            plant_instances: 2,
            cloud_instances: 1,
        };
        assert_eq!(
            stats.to_string(),
            "terrain 100 verts / 162 tris, 3 grass, 2 plants, 1 clouds"
        );
    }
}
