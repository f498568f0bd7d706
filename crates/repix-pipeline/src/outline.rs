//! Border tracing: find the background skin touching the artwork.
//!
//! Walks the background region (alpha zero) from the top-left corner
//! and records every background pixel that touches a foreground pixel
//! (alpha nonzero). Those pixels form a one-pixel-thick outline ring
//! around the artwork — the background side of the boundary, not the
//! art itself — which [`paint_outline`] then flattens to a solid color.
//!
//! The neighbor examination order is deliberately asymmetric: up,
//! up-right, right, right-down, down, down-left, left, left-up, with
//! each diagonal gated behind its cardinal neighbor being in-bounds and
//! background. This is not a generic 8-connected flood fill; the gating
//! decides which ambiguous pixels end up in the border set, and
//! changing the order changes the output on concave shapes. Keep it
//! exactly as is.
//!
//! This is step 6 in the pipeline, between compositing and upscaling.

use std::collections::HashSet;

use crate::types::{PixelCoord, RgbaImage};

/// Collect the background pixels adjacent to the artwork.
///
/// Traverses every background pixel reachable from `(0, 0)` through
/// background-only steps (diagonal steps only through their cardinal
/// gate) using an explicit work stack and a visited grid sized to the
/// raster — recursion depth would otherwise grow with the raster area.
///
/// Returns the empty set when the raster is empty or its top-left
/// corner is not background.
#[must_use = "returns the set of border pixels"]
pub fn border_pixels(image: &RgbaImage) -> HashSet<PixelCoord> {
    let (width, height) = image.dimensions();
    let mut border = HashSet::new();
    if width == 0 || height == 0 || foreground(image, 0, 0) {
        return border;
    }

    let mut visited = vec![false; width as usize * height as usize];
    let mut stack = vec![(0u32, 0u32)];

    while let Some((x, y)) = stack.pop() {
        let index = y as usize * width as usize + x as usize;
        if visited[index] {
            continue;
        }
        visited[index] = true;

        let here = PixelCoord::new(x, y);

        // Up, then up-right behind it.
        if y > 0 {
            if foreground(image, x, y - 1) {
                border.insert(here);
            } else {
                stack.push((x, y - 1));
                if x + 1 < width {
                    if foreground(image, x + 1, y - 1) {
                        border.insert(here);
                    } else {
                        stack.push((x + 1, y - 1));
                    }
                }
            }
        }
        // Right, then right-down.
        if x + 1 < width {
            if foreground(image, x + 1, y) {
                border.insert(here);
            } else {
                stack.push((x + 1, y));
                if y + 1 < height {
                    if foreground(image, x + 1, y + 1) {
                        border.insert(here);
                    } else {
                        stack.push((x + 1, y + 1));
                    }
                }
            }
        }
        // Down, then down-left.
        if y + 1 < height {
            if foreground(image, x, y + 1) {
                border.insert(here);
            } else {
                stack.push((x, y + 1));
                if x > 0 {
                    if foreground(image, x - 1, y + 1) {
                        border.insert(here);
                    } else {
                        stack.push((x - 1, y + 1));
                    }
                }
            }
        }
        // Left, then left-up.
        if x > 0 {
            if foreground(image, x - 1, y) {
                border.insert(here);
            } else {
                stack.push((x - 1, y));
                if y > 0 {
                    if foreground(image, x - 1, y - 1) {
                        border.insert(here);
                    } else {
                        stack.push((x - 1, y - 1));
                    }
                }
            }
        }
    }

    border
}

/// Repaint every border pixel with the outline color.
pub fn paint_outline(image: &mut RgbaImage, border: &HashSet<PixelCoord>, color: [u8; 4]) {
    for coord in border {
        image.put_pixel(coord.x, coord.y, image::Rgba(color));
    }
}

fn foreground(image: &RgbaImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y)[3] != 0
}
