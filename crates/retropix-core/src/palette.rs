//! Palette - ordered set of exact-distinct colors
//!
//! A `Palette` collects colors in first-seen order and guarantees that no
//! two entries share the same RGB value. Best-fit resampling snaps
//! continuous colors to the nearest palette entry, so lookup order and
//! tie-breaking are part of the contract: scans run in insertion order
//! and the first entry at minimal distance wins.

use crate::color;

/// Ordered set of exact-distinct packed RGB colors.
///
/// Alpha is not part of palette identity; entries are stored with
/// alpha pinned to 255.
///
/// # Examples
///
/// ```
/// use retropix_core::{Palette, color};
///
/// let mut pal = Palette::new();
/// assert!(pal.push_new(color::compose_rgb(255, 0, 0)));
/// assert!(!pal.push_new(color::compose_rgba(255, 0, 0, 7))); // same RGB
/// assert_eq!(pal.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<u32>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Palette { colors: Vec::new() }
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette holds no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.colors.get(index).copied()
    }

    /// Iterate over the colors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.colors.iter().copied()
    }

    /// Whether a color with the same RGB value is already present.
    pub fn contains(&self, pixel: u32) -> bool {
        let probe = normalize(pixel);
        self.colors.iter().any(|&c| c == probe)
    }

    /// Add a color unless its RGB value is already present.
    ///
    /// Returns true if the color was added.
    pub fn push_new(&mut self, pixel: u32) -> bool {
        let probe = normalize(pixel);
        if self.colors.iter().any(|&c| c == probe) {
            return false;
        }
        self.colors.push(probe);
        true
    }

    /// Find the palette color nearest to (r, g, b) by squared Euclidean
    /// RGB distance.
    ///
    /// Scans in insertion order with strict `<` improvement, so on ties
    /// the first-encountered minimal-distance entry wins; an exact match
    /// returns immediately. Returns `None` only for an empty palette.
    pub fn find_nearest(&self, r: u8, g: u8, b: u8) -> Option<u32> {
        let probe = color::compose_rgb(r, g, b);
        let mut best_dist = u32::MAX;
        let mut best = None;
        for &c in &self.colors {
            let dist = color::distance_squared(c, probe);
            if dist < best_dist {
                best_dist = dist;
                best = Some(c);
            }
            if dist == 0 {
                break;
            }
        }
        best
    }
}

/// Strip alpha so packed equality is 24-bit RGB equality.
#[inline]
fn normalize(pixel: u32) -> u32 {
    let (r, g, b) = color::extract_rgb(pixel);
    color::compose_rgb(r, g, b)
}
