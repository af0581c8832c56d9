//! Difference-region detection for spot-the-difference image pairs.
//!
//! Given two pixel-aligned RGBA images, [`detect`] returns a small set of
//! non-overlapping circular [`Difference`]s a player can click on. The
//! pipeline is synchronous and pure:
//!
//! 1. **Smoothing and diff mask** ([`diff_map`]) – Gaussian blur, then an RGB
//!    distance threshold per pixel.
//! 2. **Labelling** ([`region_labelling`]) – 8-connected flood fill.
//! 3. **Filtering** ([`filter`]) – size, aspect ratio and density.
//! 4. **Merging** ([`merge`]) – nearby bounding boxes until a fixpoint.
//! 5. **Circles** ([`circle`]) – size cap, larger-wins overlap resolution,
//!    normalisation.
//!
//! [`suggest_params`] picks an [`AnalysisParams`] preset from a cheap edge
//! density score ([`complexity`]) when hand-tuned values are not available.
//! The [`overlay`] module renders masks, regions and differences for tuning.

mod buffer;
pub mod circle;
mod colors;
pub mod complexity;
mod detect;
pub mod diff_map;
mod error;
pub mod filter;
pub mod merge;
pub mod overlay;
pub mod params;
pub mod region;
pub mod region_labelling;

pub use buffer::PixelBuffer;
pub use circle::{Circle, Difference, resolve_differences};
pub use complexity::complexity_score;
pub use detect::{DetectionReport, detect, detect_with_report, suggest_params};
pub use diff_map::{DiffMask, build_diff_mask};
pub use error::AnalysisError;
pub use filter::filter_regions;
pub use merge::merge_regions;
pub use params::{AnalysisParams, ComplexityTier, select_params};
pub use region::Region;
pub use region_labelling::label_regions;
