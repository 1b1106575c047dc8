//! Scatterers for each object category in the meadow.

use log::{debug, warn};

use super::placement::{place_on_grid, place_with_min_spacing, GridLayout};
use super::{Bounds, InstanceSet, PlantSet};
use crate::error::Result;
use crate::math::Matrix4;
use crate::noise::HeightSampler;
use crate::params::{CloudParams, GrassParams, PlantParams};

impl From<&GrassParams> for GridLayout {
    fn from(params: &GrassParams) -> Self {
        Self {
            count: params.count,
            grid_size: params.grid_size,
            grid_resolution: params.grid_resolution,
            bounds: Bounds::centered(params.bounds_half_extent),
            height_range: params.height_range,
            intensity_range: params.intensity_range,
            max_tilt_degrees: params.max_tilt_degrees,
        }
    }
}

/// Grass blades on a jittered grid.
pub fn scatter_grass<F>(
    params: &GrassParams,
    ground: &HeightSampler,
    draw: &mut F,
) -> Result<InstanceSet>
where
    F: FnMut() -> f32,
{
    params.validate()?;
    let grass = place_on_grid(&GridLayout::from(params), ground, draw)?;

    debug!("Placed {} of {} grass blades", grass.len(), params.count);
    if grass.len() < params.count / 2 {
        warn!(
            "Only {} of {} grass slots landed in bounds; check grid resolution",
            grass.len(),
            params.count
        );
    }
    Ok(grass)
}

/// Sparse plants at least `min_spacing` apart, each of a random kind.
///
/// Draws per plant after its position: kind, then yaw.
pub fn scatter_plants<F>(
    params: &PlantParams,
    ground: &HeightSampler,
    draw: &mut F,
) -> Result<PlantSet>
where
    F: FnMut() -> f32,
{
    params.validate()?;

    let positions = place_with_min_spacing(
        params.attempts,
        &Bounds::centered(params.area_half_extent),
        params.min_spacing,
        ground,
        draw,
    );

    let kind_count = params.kinds.len();
    let mut plants = PlantSet {
        transforms: Vec::with_capacity(positions.len()),
        kinds: Vec::with_capacity(positions.len()),
    };

    for position in positions {
        let kind = ((draw() * kind_count as f32) as usize).min(kind_count - 1);
        let yaw = (draw() * 360.0).to_radians();
        let plant = &params.kinds[kind];

        plants.transforms.push(
            Matrix4::translation(position.x, position.y, position.z)
                * Matrix4::rotation_y(yaw)
                * Matrix4::scale(plant.scale, plant.height, plant.scale),
        );
        plants.kinds.push(kind);
    }

    debug!(
        "Placed {} plants from {} attempts (spacing {} m)",
        plants.len(),
        params.attempts,
        params.min_spacing
    );
    Ok(plants)
}

/// Cloud planes scattered at altitude, each with a random yaw.
///
/// Heights and intensities are all 1. Draws per cloud: x, z, altitude, yaw.
pub fn scatter_clouds<F>(params: &CloudParams, draw: &mut F) -> Result<InstanceSet>
where
    F: FnMut() -> f32,
{
    params.validate()?;

    let bounds = Bounds::centered(params.spread_half_extent);
    let mut clouds = InstanceSet::with_capacity(params.count);
    for _ in 0..params.count {
        let (x, z) = bounds.sample(draw);
        let y = params.altitude_m + (draw() * 2.0 - 1.0) * params.altitude_jitter_m;
        let yaw = (draw() * 360.0).to_radians();
        clouds.push(Matrix4::translation(x, y, z) * Matrix4::rotation_y(yaw), 1.0, 1.0);
    }

    debug!("Placed {} clouds", clouds.len());
    Ok(clouds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FractalNoise;
    use crate::params::PlantKind;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn ground() -> HeightSampler {
        HeightSampler::new(FractalNoise::terrain_default(), 5.0)
    }

    #[test]
    fn test_default_grass_fills_bounds() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut draw = || rng.random::<f32>();
        let grass = scatter_grass(&GrassParams::default(), &ground(), &mut draw).unwrap();

        // 100 x 100 slots over an 80 m grid stay inside the 40 m bounds
        assert_eq!(grass.len(), 10_000);
        for (p, &h) in grass.positions().zip(&grass.heights) {
            assert!(p.x.abs() <= 40.0 && p.z.abs() <= 40.0);
            assert!((0.8..=1.2).contains(&h));
            assert!((p.y - ground().height_at(p.x, p.z)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_grass_rejects_invalid_params() {
        let params = GrassParams {
            grid_resolution: 0,
            ..GrassParams::default()
        };
        let mut draw = || 0.5;
        assert!(scatter_grass(&params, &ground(), &mut draw).is_err());
    }

    #[test]
    fn test_plants_keep_spacing_and_kind() {
        let mut rng = Pcg64Mcg::seed_from_u64(9);
        let mut draw = || rng.random::<f32>();
        let params = PlantParams::default();
        let plants = scatter_plants(&params, &ground(), &mut draw).unwrap();

        assert!(!plants.is_empty());
        assert_eq!(plants.kinds.len(), plants.len());
        assert!(plants.kinds.iter().all(|&k| k < params.kinds.len()));

        let positions: Vec<_> = plants
            .transforms
            .iter()
            .map(Matrix4::translation_part)
            .collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let dx = a.x - b.x;
                let dz = a.z - b.z;
                assert!((dx * dx + dz * dz).sqrt() >= params.min_spacing);
            }
        }
    }

    #[test]
    fn test_plant_transform_uses_kind_scale() {
        let params = PlantParams {
            attempts: 1,
            kinds: vec![
                PlantKind {
                    height: 0.3,
                    color: crate::math::Vector3::new(0.2, 0.8, 0.2),
                    scale: 0.5,
                },
                PlantKind {
                    height: 2.0,
                    color: crate::math::Vector3::new(0.8, 0.2, 0.2),
                    scale: 0.25,
                },
            ],
            ..PlantParams::default()
        };
        // position (0.5, 0.5) -> origin, kind 0.75 -> 1, yaw 0
        let mut values = [0.5, 0.5, 0.75, 0.0].into_iter();
        let mut draw = || values.next().unwrap_or(0.0);
        let plants = scatter_plants(&params, &ground(), &mut draw).unwrap();

        assert_eq!(plants.kinds, vec![1]);
        let expected = Matrix4::translation(0.0, ground().height_at(0.0, 0.0), 0.0)
            * Matrix4::scale(0.25, 2.0, 0.25);
        assert!(plants.transforms[0].abs_diff_eq(&expected, 1e-6));
    }

    #[test]
    fn test_plant_kind_never_overflows() {
        // A draw of exactly 1.0 still maps to the last kind
        let params = PlantParams {
            attempts: 1,
            ..PlantParams::default()
        };
        let mut draw = || 1.0;
        let plants = scatter_plants(&params, &ground(), &mut draw).unwrap();
        assert_eq!(plants.kinds, vec![params.kinds.len() - 1]);
    }

    #[test]
    fn test_clouds_at_altitude() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let mut draw = || rng.random::<f32>();
        let params = CloudParams::default();
        let clouds = scatter_clouds(&params, &mut draw).unwrap();

        assert_eq!(clouds.len(), params.count);
        assert!(clouds.heights.iter().all(|&h| h == 1.0));
        for cloud in &clouds.transforms {
            let p = cloud.translation_part();
            assert!((90.0..=110.0).contains(&p.y));
            assert!(p.x.abs() <= 50.0 && p.z.abs() <= 50.0);
            // Yaw only: the up axis stays vertical
            assert!((cloud.transform_vector(crate::math::Vector3::Y).y - 1.0).abs() < 1e-6);
        }
    }
}
