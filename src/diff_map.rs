use image::RgbaImage;
use imageproc::filter::gaussian_blur_f32;

use crate::buffer::PixelBuffer;
use crate::error::AnalysisError;
use crate::params::MAX_BLUR_RADIUS;

/// A dense per-pixel "different" mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
    count: usize,
}

impl DiffMask {
    /// Builds a mask from row-major bits.
    ///
    /// # Panics
    ///
    /// Panics if `bits.len() != width * height`.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Self {
        assert_eq!(
            bits.len(),
            width as usize * height as usize,
            "mask must have exactly width * height bits"
        );
        let count = bits.iter().filter(|&&b| b).count();
        Self {
            width,
            height,
            bits,
            count,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels marked different.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

/// Applies the smoothing pass to a working copy of `buffer`.
///
/// `blur_radius` is used as the Gaussian sigma. Non-positive radii return an
/// unblurred copy, since `gaussian_blur_f32` only accepts a positive sigma.
/// Radii above [`MAX_BLUR_RADIUS`] are clamped to it.
pub fn smooth(buffer: &PixelBuffer, blur_radius: f32) -> RgbaImage {
    if blur_radius > 0.0 {
        gaussian_blur_f32(buffer.as_image(), blur_radius.min(MAX_BLUR_RADIUS))
    } else {
        buffer.as_image().clone()
    }
}

/// Smooths both images and marks every pixel whose RGB distance exceeds
/// `color_threshold`.
///
/// The distance is Euclidean over red, green and blue; alpha is ignored. A
/// pixel is different iff `distance > color_threshold`, so a threshold at or
/// above `255 * sqrt(3)` can never fire.
///
/// # Errors
///
/// [`AnalysisError::ZeroDimension`] if either image is empty and
/// [`AnalysisError::DimensionMismatch`] if their sizes differ.
pub fn build_diff_mask(
    original: &PixelBuffer,
    modified: &PixelBuffer,
    blur_radius: f32,
    color_threshold: f64,
) -> Result<DiffMask, AnalysisError> {
    ensure_comparable(original, modified)?;

    let (width, height) = original.dimensions();
    let a = smooth(original, blur_radius);
    let b = smooth(modified, blur_radius);

    // Compare squared distances to stay in integers per pixel.
    let threshold_sq = color_threshold * color_threshold;
    let bits: Vec<bool> = a
        .as_raw()
        .chunks_exact(4)
        .zip(b.as_raw().chunks_exact(4))
        .map(|(p, q)| {
            let dr = i32::from(p[0]) - i32::from(q[0]);
            let dg = i32::from(p[1]) - i32::from(q[1]);
            let db = i32::from(p[2]) - i32::from(q[2]);
            f64::from(dr * dr + dg * dg + db * db) > threshold_sq
        })
        .collect();

    let mask = DiffMask::from_bits(width, height, bits);
    tracing::debug!(
        width,
        height,
        different = mask.count(),
        "built difference mask"
    );
    Ok(mask)
}

pub(crate) fn ensure_comparable(
    original: &PixelBuffer,
    modified: &PixelBuffer,
) -> Result<(), AnalysisError> {
    if original.dimensions() != modified.dimensions() {
        return Err(AnalysisError::DimensionMismatch {
            original: original.dimensions(),
            modified: modified.dimensions(),
        });
    }
    original.ensure_non_empty()
}
