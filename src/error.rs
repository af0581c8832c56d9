use thiserror::Error;

/// Errors returned by the detection engine.
///
/// A failed call never yields partial results. None of these are retried
/// internally; the caller has to re-source the images or fix the parameters.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(
        "image dimensions differ: original is {}x{}, modified is {}x{}",
        .original.0, .original.1, .modified.0, .modified.1
    )]
    DimensionMismatch {
        original: (u32, u32),
        modified: (u32, u32),
    },
    #[error("image has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("pixel data could not be read: {reason}")]
    SourceUnreadable { reason: String },
    #[error("invalid analysis parameter `{name}`: {reason}")]
    InvalidParams { name: &'static str, reason: String },
    #[error("malformed parameter file: {0}")]
    Config(#[from] serde_json::Error),
}
