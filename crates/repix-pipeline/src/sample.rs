//! Grid sampling: resample the photograph onto the recovered grid.
//!
//! For each cell of the fixed-size output grid, the cell center is
//! expressed in grid units, rotated into the source frame, scaled by
//! the pixel pitch, and the nearest source pixel is copied. No
//! interpolation — nearest-pixel sampling matches the blocky nature of
//! pixel art. Cells whose sample point falls outside the source raster
//! keep the background-white default; that is an expected case, not an
//! error.
//!
//! This is step 2 in the pipeline, between parameter estimation and
//! cropping.

use std::f64::consts::FRAC_PI_2;

use crate::types::{BACKGROUND, GridParams, PipelineConfig, PixelCoord, RgbImage};

/// Resample `source` onto the recovered art grid.
///
/// Returns the low-resolution raster and the source coordinates that
/// were actually read, in scan order, for diagnostic overlays.
///
/// The output grid is centered: the per-axis offsets are converted to
/// grid units and shifted by half the grid dimensions, so the grid
/// origin sits in the middle of the output rather than its corner.
/// The rotation applies `angle - pi/2`; the quarter-turn corrects for
/// the frame in which the line angles were measured.
#[must_use = "returns the resampled raster and the sampled coordinates"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample(
    source: &RgbImage,
    params: &GridParams,
    config: &PipelineConfig,
) -> (RgbImage, Vec<PixelCoord>) {
    let (src_w, src_h) = source.dimensions();
    let mut output = RgbImage::from_pixel(config.grid_width, config.grid_height, BACKGROUND);
    let mut sampled = Vec::new();

    let (sin, cos) = (params.angle - FRAC_PI_2).sin_cos();
    let off_x = params.offset_x / params.pitch - f64::from(config.grid_width) / 2.0;
    let off_y = params.offset_y / params.pitch - f64::from(config.grid_height) / 2.0;

    for py in 0..config.grid_height {
        for px in 0..config.grid_width {
            // 0.5 samples the center of the art pixel, not its corner.
            let gx = f64::from(px) + 0.5 + off_x;
            let gy = f64::from(py) + 0.5 + off_y;
            let ux = gy.mul_add(-sin, gx * cos);
            let uy = gx.mul_add(sin, gy * cos);
            let sx = (params.pitch * ux) as i64;
            let sy = (params.pitch * uy) as i64;
            if sx >= 0 && sy >= 0 && (sx as u64) < u64::from(src_w) && (sy as u64) < u64::from(src_h)
            {
                let (sx, sy) = (sx as u32, sy as u32);
                output.put_pixel(px, py, *source.get_pixel(sx, sy));
                sampled.push(PixelCoord::new(sx, sy));
            }
        }
    }

    (output, sampled)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::Rgb;

    fn small_grid_config(size: u32) -> PipelineConfig {
        PipelineConfig {
            grid_width: size,
            grid_height: size,
            ..PipelineConfig::default()
        }
    }

    /// Identity-frame parameters: `angle = pi/2` cancels the quarter-turn
    /// correction, and the offsets cancel the grid centering.
    fn identity_params(pitch: f64, grid: u32) -> GridParams {
        GridParams {
            angle: FRAC_PI_2,
            pitch,
            offset_x: pitch * f64::from(grid) / 2.0,
            offset_y: pitch * f64::from(grid) / 2.0,
        }
    }

    #[test]
    fn axis_aligned_blocks_round_trip() {
        // 40x40 source of 10x10 single-color blocks; each output cell
        // should pick up its block's color.
        let source = RgbImage::from_fn(40, 40, |x, y| {
            Rgb([(x / 10 * 60) as u8, (y / 10 * 60) as u8, 7])
        });
        let config = small_grid_config(4);
        let (output, sampled) = sample(&source, &identity_params(10.0, 4), &config);

        for py in 0..4u32 {
            for px in 0..4u32 {
                assert_eq!(
                    *output.get_pixel(px, py),
                    Rgb([(px * 60) as u8, (py * 60) as u8, 7]),
                    "cell ({px}, {py})",
                );
            }
        }
        assert_eq!(sampled.len(), 16);
    }

    #[test]
    fn sample_points_hit_block_centers() {
        let source = RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]));
        let config = small_grid_config(4);
        let (_, sampled) = sample(&source, &identity_params(10.0, 4), &config);
        assert_eq!(sampled[0], PixelCoord::new(5, 5));
        assert_eq!(sampled[1], PixelCoord::new(15, 5));
        assert_eq!(sampled[4], PixelCoord::new(5, 15));
    }

    #[test]
    fn out_of_bounds_cells_stay_white() {
        // A 20x20 source only covers the top-left 2x2 cells of the grid.
        let source = RgbImage::from_pixel(20, 20, Rgb([1, 2, 3]));
        let config = small_grid_config(4);
        let (output, sampled) = sample(&source, &identity_params(10.0, 4), &config);

        assert_eq!(*output.get_pixel(0, 0), Rgb([1, 2, 3]));
        assert_eq!(*output.get_pixel(1, 1), Rgb([1, 2, 3]));
        assert_eq!(*output.get_pixel(3, 0), BACKGROUND);
        assert_eq!(*output.get_pixel(0, 3), BACKGROUND);
        assert_eq!(sampled.len(), 4);
    }

    #[test]
    fn rotated_rendering_round_trips() {
        // Render a synthetic rotated photograph of an 8x8 pattern by
        // inverting the sampler's transform, then check the sampler
        // reproduces the pattern pixel-for-pixel.
        let theta: f64 = 0.3;
        let pitch: f64 = 9.0;
        let grid = 8u32;
        let alpha = theta - FRAC_PI_2;
        let (sin_a, cos_a) = alpha.sin_cos();

        // Place the grid center at the middle of a 200x200 source.
        let u_cx = 100.0 / pitch;
        let u_cy = 100.0 / pitch;
        let g_cx = u_cy.mul_add(sin_a, u_cx * cos_a);
        let g_cy = u_cy.mul_add(cos_a, -(u_cx * sin_a));
        let off_x = g_cx - (f64::from(grid) / 2.0 + 0.5);
        let off_y = g_cy - (f64::from(grid) / 2.0 + 0.5);

        let pattern =
            |px: u32, py: u32| -> Rgb<u8> { Rgb([(px * 30) as u8, (py * 30) as u8, 200]) };

        let source = RgbImage::from_fn(200, 200, |sx, sy| {
            let ux = (f64::from(sx) + 0.5) / pitch;
            let uy = (f64::from(sy) + 0.5) / pitch;
            let gx = uy.mul_add(sin_a, ux * cos_a);
            let gy = uy.mul_add(cos_a, -(ux * sin_a));
            let px = (gx - off_x).floor();
            let py = (gy - off_y).floor();
            if px >= 0.0 && py >= 0.0 && px < f64::from(grid) && py < f64::from(grid) {
                pattern(px as u32, py as u32)
            } else {
                Rgb([255, 255, 255])
            }
        });

        let params = GridParams {
            angle: theta,
            pitch,
            offset_x: (off_x + f64::from(grid) / 2.0) * pitch,
            offset_y: (off_y + f64::from(grid) / 2.0) * pitch,
        };
        let config = small_grid_config(grid);
        let (output, sampled) = sample(&source, &params, &config);

        for py in 0..grid {
            for px in 0..grid {
                assert_eq!(*output.get_pixel(px, py), pattern(px, py), "cell ({px}, {py})");
            }
        }
        assert_eq!(sampled.len(), (grid * grid) as usize);
        for coord in sampled {
            assert!(coord.x < 200 && coord.y < 200);
        }
    }
}
