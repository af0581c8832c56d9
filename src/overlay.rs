//! Debug renderings of the intermediate and final detection results.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use num_traits::ToPrimitive;

use crate::buffer::PixelBuffer;
use crate::circle::Difference;
use crate::colors::marker_color;
use crate::diff_map::DiffMask;
use crate::region::Region;

const REGION_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Renders the difference mask as black and white (255 = different).
pub fn mask_to_image(mask: &DiffMask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        if mask.get(x, y) { Luma([255]) } else { Luma([0]) }
    })
}

/// Draws every region's bounding box on a copy of `base`.
pub fn draw_regions(base: &PixelBuffer, regions: &[Region]) -> RgbaImage {
    let mut canvas = base.as_image().clone();
    for region in regions {
        let bounds = region.to_rect();
        let (Some(x), Some(y)) = (bounds.x.to_i32(), bounds.y.to_i32()) else {
            tracing::warn!(?region, "skipping region outside drawable range");
            continue;
        };
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(x, y).of_size(bounds.width, bounds.height),
            REGION_COLOR,
        );
    }
    canvas
}

/// Draws each difference as a hollow circle on a copy of `base`, one colour
/// per id.
///
/// Coordinates are denormalised against `base`, which should be one of the
/// images the differences were detected on. Degenerate circles that do not
/// fit in `i32` are skipped.
pub fn draw_differences(base: &PixelBuffer, differences: &[Difference]) -> RgbaImage {
    let (width, height) = base.dimensions();
    let mut canvas = base.as_image().clone();

    for difference in differences {
        let circle = difference.to_pixel_circle(width, height);
        let (Some(x), Some(y), Some(radius)) = (
            circle.x.round().to_i32(),
            circle.y.round().to_i32(),
            circle.radius.round().to_i32(),
        ) else {
            tracing::warn!(?difference, "skipping difference outside drawable range");
            continue;
        };
        let color = marker_color(difference.id, 255);
        // Two rings so the marker stays visible on busy images.
        draw_hollow_circle_mut(&mut canvas, (x, y), radius.max(1), color);
        draw_hollow_circle_mut(&mut canvas, (x, y), radius.max(1) + 1, color);
    }
    canvas
}
