//! retropix-blend - Error-driven blending of resampling results
//!
//! This crate decides, pixel by pixel, which of two renders to keep:
//!
//! - [`compare`] builds a smoothed signed difference map against a
//!   reference render
//! - [`choose`] swaps in the alternative where the difference peaks and
//!   the dominance weight says the swap is meaningful
//! - [`render`] is the shell-facing dispatch over every sampling
//!   method, including the minimize-error composite
//! - [`collect_colors`] harvests a palette for best-fit sampling

pub mod blend;
mod error;
pub mod render;

pub use error::{BlendError, BlendResult};

// Re-export the main entry points
pub use blend::{NEUTRAL, choose, collect_colors, compare, minimize_error};
pub use render::{diff_against_bicubic, render};
