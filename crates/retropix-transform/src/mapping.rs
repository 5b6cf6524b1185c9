//! Quad mappings
//!
//! A [`QuadMapping`] pairs an axis-aligned bounding rectangle with four
//! corner points stored relative to the rectangle's origin. Transforms
//! rasterize over the bounds and feed the local quad to the geometric
//! solves, so one mapping determines both the output size and the shape
//! drawn inside it.

use crate::geometry::{Point, Rect};

/// A quadrilateral together with its axis-aligned bounds.
///
/// Corners run clockwise from the top-left and are stored relative to
/// the bounds' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadMapping {
    bounds: Rect,
    quad: [Point; 4],
}

impl QuadMapping {
    /// Build a mapping from four corner points in buffer coordinates.
    ///
    /// The bounds are the min/max of the points on each axis; the stored
    /// quad is the points shifted so the bounds' top-left becomes the
    /// origin.
    pub fn from_points(points: &[Point; 4]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        QuadMapping {
            bounds: Rect::new(min.x, min.y, max.x, max.y),
            quad: [
                points[0] - min,
                points[1] - min,
                points[2] - min,
                points[3] - min,
            ],
        }
    }

    /// Build the identity mapping of a rectangle onto itself.
    pub fn from_rect(rect: Rect) -> Self {
        QuadMapping {
            bounds: rect,
            quad: [
                Point::new(0.0, 0.0),
                Point::new(rect.width(), 0.0),
                Point::new(rect.width(), rect.height()),
                Point::new(0.0, rect.height()),
            ],
        }
    }

    /// Get the axis-aligned bounds in buffer coordinates.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Get the corner quad relative to the bounds' top-left.
    #[inline]
    pub fn local_quad(&self) -> &[Point; 4] {
        &self.quad
    }

    /// Get the bounds width truncated to whole pixels.
    #[inline]
    pub fn pixel_width(&self) -> u32 {
        self.bounds.width() as u32
    }

    /// Get the bounds height truncated to whole pixels.
    #[inline]
    pub fn pixel_height(&self) -> u32 {
        self.bounds.height() as u32
    }
}
