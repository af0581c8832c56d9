use crate::buffer::PixelBuffer;
use crate::circle::{Difference, resolve_differences};
use crate::complexity::complexity_score;
use crate::diff_map::{DiffMask, build_diff_mask, ensure_comparable};
use crate::error::AnalysisError;
use crate::filter::filter_regions;
use crate::merge::merge_regions;
use crate::params::{AnalysisParams, select_params};
use crate::region::Region;
use crate::region_labelling::label_regions;

/// Everything one detection run produced, for tuning and debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReport {
    /// The final differences, exactly what [`detect`] returns.
    pub differences: Vec<Difference>,
    /// The colour-distance mask every later stage worked from.
    pub mask: DiffMask,
    /// Pixels marked different by the colour-distance test.
    pub diff_pixel_count: usize,
    /// Regions found by connected-component labelling.
    pub labelled: usize,
    /// Regions left after size, aspect-ratio and density filtering.
    pub filtered: usize,
    /// Regions after merging, before circle resolution.
    pub merged: Vec<Region>,
}

/// Finds the clickable differences between two pixel-aligned images.
///
/// The result is ordered by circle radius, largest first, with ids assigned
/// in that order. Identical images yield an empty list. The call is pure:
/// the same inputs always produce the same output.
///
/// # Errors
///
/// * [`AnalysisError::DimensionMismatch`] if the images differ in size.
/// * [`AnalysisError::ZeroDimension`] if they are empty.
/// * [`AnalysisError::InvalidParams`] if `params` fails validation.
///
/// # Examples
///
/// ```
/// use diff_spotter::{AnalysisParams, PixelBuffer, detect};
/// use image::{Rgba, RgbaImage};
///
/// let original = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));
/// let mut modified = original.clone();
/// for y in 40..60 {
///     for x in 40..60 {
///         modified.put_pixel(x, y, Rgba([255, 0, 0, 255]));
///     }
/// }
///
/// let differences = detect(
///     &PixelBuffer::from_image(original),
///     &PixelBuffer::from_image(modified),
///     &AnalysisParams { min_region_size: 50, ..AnalysisParams::default() },
/// )
/// .unwrap();
///
/// assert_eq!(differences.len(), 1);
/// assert!((differences[0].x - 0.495).abs() < 0.01);
/// ```
pub fn detect(
    original: &PixelBuffer,
    modified: &PixelBuffer,
    params: &AnalysisParams,
) -> Result<Vec<Difference>, AnalysisError> {
    detect_with_report(original, modified, params).map(|report| report.differences)
}

/// Runs [`detect`] and also returns the intermediate stage results.
pub fn detect_with_report(
    original: &PixelBuffer,
    modified: &PixelBuffer,
    params: &AnalysisParams,
) -> Result<DetectionReport, AnalysisError> {
    ensure_comparable(original, modified)?;
    params.validate()?;

    let mask = build_diff_mask(original, modified, params.blur_radius, params.color_threshold)?;
    if mask.is_empty() {
        tracing::debug!("no differing pixels");
        return Ok(DetectionReport {
            differences: Vec::new(),
            mask,
            diff_pixel_count: 0,
            labelled: 0,
            filtered: 0,
            merged: Vec::new(),
        });
    }

    let labelled = label_regions(&mask);
    let labelled_count = labelled.len();

    let filtered = filter_regions(labelled, params);
    let filtered_count = filtered.len();

    let merged = merge_regions(filtered, params.merge_distance);

    let (width, height) = original.dimensions();
    let differences = resolve_differences(
        &merged,
        params.circle_radius_multiplier,
        params.max_region_size_percent,
        width,
        height,
    );

    tracing::debug!(
        diff_pixels = mask.count(),
        labelled = labelled_count,
        filtered = filtered_count,
        merged = merged.len(),
        differences = differences.len(),
        "detection finished"
    );

    Ok(DetectionReport {
        differences,
        diff_pixel_count: mask.count(),
        mask,
        labelled: labelled_count,
        filtered: filtered_count,
        merged,
    })
}

/// Scores the image's complexity and returns the matching parameter preset.
///
/// # Errors
///
/// [`AnalysisError::ZeroDimension`] for empty images.
pub fn suggest_params(buffer: &PixelBuffer) -> Result<AnalysisParams, AnalysisError> {
    buffer.ensure_non_empty()?;
    Ok(select_params(complexity_score(buffer)))
}
