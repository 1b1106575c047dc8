//! Grayscale heightmap export for inspecting noise fields.

use ::noise::NoiseFn;
use image::{GrayImage, Luma};

use crate::error::{GeometryError, Result};

/// Largest accepted image edge (pixels).
pub const MAX_SIZE: u32 = 8192;

/// Map a noise value in `[-1, 1]` to a gray level; out-of-range values saturate.
pub fn value_to_gray(value: f64) -> u8 {
    ((value + 1.0) * 127.5).clamp(0.0, 255.0) as u8
}

/// Render `noise` top-down on a `size x size` grid spanning
/// `[-extent/2, extent/2]` on both axes.
///
/// Pixel columns follow world X and rows follow world Z, with the corner
/// pixels sampling the grid corners exactly (same spacing as the terrain mesh).
///
/// # Arguments
/// * `noise` - Any 2D noise; [`FractalNoise`](crate::noise::FractalNoise) takes world coordinates
/// * `size` - Image width and height in pixels, `2..=MAX_SIZE`
/// * `extent` - World-space edge length covered by the image
pub fn render<N>(noise: &N, size: u32, extent: f64) -> Result<GrayImage>
where
    N: NoiseFn<f64, 2>,
{
    if !(2..=MAX_SIZE).contains(&size) {
        return Err(GeometryError::InvalidSize(format!(
            "heightmap size must be between 2 and {} pixels, got {}",
            MAX_SIZE, size
        )));
    }
    if !(extent.is_finite() && extent > 0.0) {
        return Err(GeometryError::InvalidSize(format!(
            "heightmap extent must be positive and finite, got {}",
            extent
        )));
    }

    let half = extent / 2.0;
    let step = extent / (size - 1) as f64;
    let mut img = GrayImage::new(size, size);

    for y in 0..size {
        for x in 0..size {
            let wx = x as f64 * step - half;
            let wz = y as f64 * step - half;
            img.put_pixel(x, y, Luma([value_to_gray(noise.get([wx, wz]))]));
        }
    }

    Ok(img)
}
