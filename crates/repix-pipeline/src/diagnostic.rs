//! Diagnostic overlays for stage previews.
//!
//! Draws detected lines and sampled source coordinates onto a copy of
//! the photograph so the detection and sampling stages can be inspected
//! visually. Not required for correctness; the CLI uses these for its
//! `--stages` output.

use imageproc::drawing::draw_line_segment_mut;

use crate::types::{Line, PixelCoord, RgbImage};

const OVERLAY: image::Rgb<u8> = image::Rgb([0, 0, 0]);

/// Half-length of a drawn line segment, in pixels. Long enough to
/// cross any raster the pipeline realistically sees.
const REACH: f32 = 1000.0;

/// Draw each Hesse-normal-form line across the image in black.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_lines(image: &mut RgbImage, lines: &[Line]) {
    for line in lines {
        let (sin, cos) = line.theta.sin_cos();
        let x0 = (cos * line.rho) as f32;
        let y0 = (sin * line.rho) as f32;
        let (dx, dy) = (-sin as f32, cos as f32);
        draw_line_segment_mut(
            image,
            (dx.mul_add(REACH, x0), dy.mul_add(REACH, y0)),
            (dx.mul_add(-REACH, x0), dy.mul_add(-REACH, y0)),
            OVERLAY,
        );
    }
}

/// Mark each sampled source coordinate with a black pixel.
pub fn draw_sample_points(image: &mut RgbImage, points: &[PixelCoord]) {
    let (width, height) = image.dimensions();
    for point in points {
        if point.x < width && point.y < height {
            image.put_pixel(point.x, point.y, OVERLAY);
        }
    }
}
