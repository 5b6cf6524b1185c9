//! Error types for retropix-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] retropix_core::Error),

    /// Quad whose diagonal cross product vanishes (self-intersecting
    /// or collinear corners)
    #[error("degenerate quad")]
    DegenerateQuad,

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,

    /// Palette-snapping sampler built without a usable palette
    #[error("missing palette for best-fit sampling")]
    MissingPalette,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
