use crate::buffer::PixelBuffer;

/// Brightness step (0-255 scale) above which a pixel counts as an edge.
pub const EDGE_THRESHOLD: f64 = 25.0;

/// Scores how visually busy an image is as the fraction of interior pixels
/// that sit on a brightness edge.
///
/// A pixel's brightness is the mean of its R, G and B channels. An interior
/// pixel (the one-pixel border is skipped) is an edge pixel if the brightness
/// of its right or lower neighbour differs by more than [`EDGE_THRESHOLD`].
/// Images with no interior (either side shorter than 3) score `0.0`.
///
/// The result lies in `[0, 1]` and is only meant for picking a preset.
///
/// # Examples
///
/// ```
/// use diff_spotter::{PixelBuffer, complexity_score};
///
/// let flat = PixelBuffer::from_raw(8, 8, vec![128; 8 * 8 * 4]).unwrap();
/// assert_eq!(complexity_score(&flat), 0.0);
/// ```
pub fn complexity_score(buffer: &PixelBuffer) -> f64 {
    let (width, height) = buffer.dimensions();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let (width, height) = (width as usize, height as usize);
    let data = buffer.as_raw();
    let brightness = |x: usize, y: usize| -> f64 {
        let i = (y * width + x) * 4;
        (f64::from(data[i]) + f64::from(data[i + 1]) + f64::from(data[i + 2])) / 3.0
    };

    let mut edge_pixels = 0usize;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let here = brightness(x, y);
            if (here - brightness(x + 1, y)).abs() > EDGE_THRESHOLD
                || (here - brightness(x, y + 1)).abs() > EDGE_THRESHOLD
            {
                edge_pixels += 1;
            }
        }
    }

    let interior = (width - 2) * (height - 2);
    edge_pixels as f64 / interior as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgba, RgbaImage};

    #[test]
    fn tiny_images_have_no_interior() {
        let buffer = PixelBuffer::from_image(RgbaImage::new(2, 50));
        assert_eq!(complexity_score(&buffer), 0.0);
    }

    #[test]
    fn checkerboard_is_maximally_complex() {
        let image = RgbaImage::from_fn(10, 10, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        assert_relative_eq!(complexity_score(&PixelBuffer::from_image(image)), 1.0);
    }

    #[test]
    fn single_vertical_edge() {
        // Columns 0..5 black, 5..10 white. Only interior column x = 4 sees a
        // step to its right; 8 interior rows out of an 8x8 interior.
        let image = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        assert_relative_eq!(complexity_score(&PixelBuffer::from_image(image)), 8.0 / 64.0);
    }

    #[test]
    fn small_steps_are_not_edges() {
        let image = RgbaImage::from_fn(10, 10, |x, _| {
            let v = (x * 20) as u8;
            Rgba([v, v, v, 255])
        });
        assert_eq!(complexity_score(&PixelBuffer::from_image(image)), 0.0);
    }

    #[test]
    fn alpha_does_not_contribute() {
        let image = RgbaImage::from_fn(10, 10, |x, y| Rgba([90, 90, 90, ((x * 31 + y * 17) % 256) as u8]));
        assert_eq!(complexity_score(&PixelBuffer::from_image(image)), 0.0);
    }
}
