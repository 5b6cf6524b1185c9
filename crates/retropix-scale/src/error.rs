//! Error types for retropix-scale

use thiserror::Error;

/// Errors that can occur during scaling operations
#[derive(Debug, Error)]
pub enum ScaleError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] retropix_core::Error),

    /// Window does not fit the operation
    #[error("window mismatch: {0}x{1} window, {2}x{3} needed")]
    WindowMismatch(u32, u32, u32, u32),
}

/// Result type for scaling operations
pub type ScaleResult<T> = Result<T, ScaleError>;
