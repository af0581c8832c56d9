use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Complexity at or above which an image is no longer considered "low".
pub const LOW_COMPLEXITY_MAX: f64 = 0.06;
/// Complexity above which an image is considered "high".
pub const MEDIUM_COMPLEXITY_MAX: f64 = 0.15;
/// Largest accepted `blurRadius`. The Gaussian kernel grows linearly with
/// sigma, and past a few hundred pixels the result is already a flat average.
pub const MAX_BLUR_RADIUS: f32 = 256.0;

/// Every tunable of the detection pipeline after complexity scoring.
///
/// Deserialization fills missing fields from [`AnalysisParams::default`], so a
/// parameter file only needs the values it overrides:
///
/// ```
/// use diff_spotter::AnalysisParams;
///
/// let params = AnalysisParams::from_json_str(r#"{ "colorThreshold": 60 }"#).unwrap();
/// assert_eq!(params.color_threshold, 60.0);
/// assert_eq!(params.min_region_size, AnalysisParams::default().min_region_size);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Gaussian sigma of the smoothing pass, in pixels. `0` disables smoothing.
    pub blur_radius: f32,
    /// Minimum Euclidean RGB distance for a pixel to count as different.
    pub color_threshold: f64,
    /// Minimum pixel count of a region.
    pub min_region_size: usize,
    /// Bounding boxes closer than this many pixels are merged.
    pub merge_distance: f64,
    /// Minimum ratio of pixel count to bounding-box area.
    pub min_density: f64,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    /// Largest allowed bounding-box side, as a fraction of the image's shorter side.
    pub max_region_size_percent: f64,
    /// Padding factor applied to each bounding circle's radius.
    pub circle_radius_multiplier: f64,
}

/// The preset buckets the complexity heuristic selects between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    /// Buckets a complexity score. Scores below [`LOW_COMPLEXITY_MAX`] are
    /// low, scores up to and including [`MEDIUM_COMPLEXITY_MAX`] are medium.
    pub fn from_complexity(complexity: f64) -> Self {
        if complexity < LOW_COMPLEXITY_MAX {
            ComplexityTier::Low
        } else if complexity <= MEDIUM_COMPLEXITY_MAX {
            ComplexityTier::Medium
        } else {
            ComplexityTier::High
        }
    }

    pub fn params(self) -> AnalysisParams {
        match self {
            ComplexityTier::Low => AnalysisParams::LOW,
            ComplexityTier::Medium => AnalysisParams::MEDIUM,
            ComplexityTier::High => AnalysisParams::HIGH,
        }
    }
}

/// Looks up the preset for a complexity score.
pub fn select_params(complexity: f64) -> AnalysisParams {
    let tier = ComplexityTier::from_complexity(complexity);
    tracing::debug!(complexity, ?tier, "selected parameter preset");
    tier.params()
}

impl AnalysisParams {
    /// Flat, low-detail images: looser thresholds, generous merging.
    pub const LOW: AnalysisParams = AnalysisParams {
        blur_radius: 2.0,
        color_threshold: 35.0,
        min_region_size: 40,
        merge_distance: 40.0,
        min_density: 0.15,
        min_aspect_ratio: 0.2,
        max_aspect_ratio: 5.0,
        max_region_size_percent: 0.5,
        circle_radius_multiplier: 1.4,
    };

    pub const MEDIUM: AnalysisParams = AnalysisParams {
        blur_radius: 3.0,
        color_threshold: 45.0,
        min_region_size: 80,
        merge_distance: 25.0,
        min_density: 0.25,
        min_aspect_ratio: 0.25,
        max_aspect_ratio: 4.0,
        max_region_size_percent: 0.4,
        circle_radius_multiplier: 1.25,
    };

    /// Busy, textured images: stricter size and density, less merging and padding.
    pub const HIGH: AnalysisParams = AnalysisParams {
        blur_radius: 4.0,
        color_threshold: 55.0,
        min_region_size: 150,
        merge_distance: 15.0,
        min_density: 0.35,
        min_aspect_ratio: 0.3,
        max_aspect_ratio: 3.3,
        max_region_size_percent: 0.35,
        circle_radius_multiplier: 1.1,
    };

    /// Parses a (possibly partial) JSON parameter object and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, AnalysisError> {
        let params: AnalysisParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that every field is inside its domain.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidParams`] naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        fn non_negative(name: &'static str, value: f64) -> Result<(), AnalysisError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(AnalysisError::InvalidParams {
                    name,
                    reason: format!("must be a finite, non-negative number, got {value}"),
                })
            }
        }

        non_negative("blurRadius", f64::from(self.blur_radius))?;
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(AnalysisError::InvalidParams {
                name: "blurRadius",
                reason: format!(
                    "{} exceeds the maximum of {MAX_BLUR_RADIUS}",
                    self.blur_radius
                ),
            });
        }
        non_negative("colorThreshold", self.color_threshold)?;
        non_negative("mergeDistance", self.merge_distance)?;
        non_negative("minDensity", self.min_density)?;
        non_negative("minAspectRatio", self.min_aspect_ratio)?;
        non_negative("maxAspectRatio", self.max_aspect_ratio)?;
        non_negative("maxRegionSizePercent", self.max_region_size_percent)?;
        non_negative("circleRadiusMultiplier", self.circle_radius_multiplier)?;

        if self.min_aspect_ratio > self.max_aspect_ratio {
            return Err(AnalysisError::InvalidParams {
                name: "minAspectRatio",
                reason: format!(
                    "{} exceeds maxAspectRatio {}",
                    self.min_aspect_ratio, self.max_aspect_ratio
                ),
            });
        }
        if self.circle_radius_multiplier == 0.0 {
            return Err(AnalysisError::InvalidParams {
                name: "circleRadiusMultiplier",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams::MEDIUM
    }
}
