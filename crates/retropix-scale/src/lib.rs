//! retropix-scale - Pattern-matching pixel-art upscalers
//!
//! This crate provides integer-factor upscalers driven by exact
//! neighborhood equality tests:
//!
//! - Scale2x / Scale3x / Scale4x block rules
//! - Eagle 2x block rule
//! - High-quality variants with in-place cleanup passes
//! - The sliding [`Window`] the passes are built on

pub mod cleanup;
mod error;
pub mod scale;
pub mod window;

pub use error::{ScaleError, ScaleResult};
pub use window::Window;

// Re-export the main entry points
pub use cleanup::{buff_double, buff_triple_loose, buff_triple_strict, fill_fissure, fill_single};
pub use scale::{ScaleMethod, scale};
