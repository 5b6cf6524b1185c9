//! Error types for retropix-blend

use thiserror::Error;

/// Errors that can occur while comparing and blending renders
#[derive(Debug, Error)]
pub enum BlendError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] retropix_core::Error),

    /// Transformation error from a composed render
    #[error("transform error: {0}")]
    Transform(#[from] retropix_transform::TransformError),
}

/// Result type for blend operations
pub type BlendResult<T> = Result<T, BlendError>;
