//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic test raster
    #[error("failed to build test raster: {message}")]
    RasterBuild { message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
