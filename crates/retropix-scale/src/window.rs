//! Sliding neighborhood window
//!
//! A `Window` caches a small grid of pixels around a cursor that sweeps a
//! buffer row-major. Pattern-matching scalers test and repaint cells of the
//! window instead of hitting the buffer for every neighbor.

use retropix_core::{Raster, RasterMut, color};

use crate::{ScaleError, ScaleResult};

/// Cursor position within a window's scan area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    x: u32,
    y: u32,
}

/// A sliding window over a pixel buffer
///
/// Holds a `width` x `height` grid of cells. Cell `(cx, cy)` corresponds to
/// buffer coordinate `(cursor.x + cx - center_x, cursor.y + cy - center_y)`,
/// so the cell at `(center_x, center_y)` tracks the cursor itself. The
/// cursor sweeps a `scan_width` x `scan_height` area row-major, advancing by
/// a caller-chosen stride on each [`read`](Window::read) or
/// [`write`](Window::write).
///
/// Cells store packed pixels with alpha pinned to 255, so cell equality is
/// 24-bit RGB equality.
#[derive(Debug, Clone)]
pub struct Window {
    /// Width of the scanned area
    scan_width: u32,
    /// Height of the scanned area
    scan_height: u32,
    /// Number of cell columns
    width: u32,
    /// Number of cell rows
    height: u32,
    /// Cell column aligned with the cursor
    center_x: u32,
    /// Cell row aligned with the cursor
    center_y: u32,
    /// Current scan position
    cursor: Cursor,
    /// Cell data (row-major order)
    cells: Vec<u32>,
}

impl Window {
    /// Create a window with its cursor at the top-left of the scan area.
    ///
    /// A zero-sized scan area is legal; the first read or write then
    /// reports exhaustion immediately.
    pub fn new(
        scan_width: u32,
        scan_height: u32,
        width: u32,
        height: u32,
        center_x: u32,
        center_y: u32,
    ) -> Self {
        Self {
            scan_width,
            scan_height,
            width,
            height,
            center_x,
            center_y,
            cursor: Cursor { x: 0, y: 0 },
            cells: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Get the number of cell columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the number of cell rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the cursor's current column in the scan area.
    #[inline]
    pub fn cursor_x(&self) -> u32 {
        self.cursor.x
    }

    /// Get the cursor's current row in the scan area.
    #[inline]
    pub fn cursor_y(&self) -> u32 {
        self.cursor.y
    }

    #[inline]
    fn cell_index(&self, cx: u32, cy: u32) -> usize {
        (cy as usize) * (self.width as usize) + (cx as usize)
    }

    /// Get a cell value, or `None` when `(cx, cy)` is outside the grid.
    #[inline]
    pub fn get(&self, cx: u32, cy: u32) -> Option<u32> {
        if cx >= self.width || cy >= self.height {
            return None;
        }
        Some(self.cells[self.cell_index(cx, cy)])
    }

    /// Get a cell value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `(cx, cy)` is outside the cell grid.
    #[inline]
    pub fn get_unchecked(&self, cx: u32, cy: u32) -> u32 {
        self.cells[self.cell_index(cx, cy)]
    }

    /// Set a cell value.
    pub fn set(&mut self, cx: u32, cy: u32, value: u32) -> ScaleResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(retropix_core::Error::IndexOutOfBounds {
                index: (cy as usize) * (self.width as usize) + (cx as usize),
                len: self.cells.len(),
            }
            .into());
        }
        let index = self.cell_index(cx, cy);
        self.cells[index] = value;
        Ok(())
    }

    /// Set a cell value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `(cx, cy)` is outside the cell grid.
    #[inline]
    pub fn set_unchecked(&mut self, cx: u32, cy: u32, value: u32) {
        let index = self.cell_index(cx, cy);
        self.cells[index] = value;
    }

    /// Fill every cell from `source`, then advance the cursor by `step`.
    ///
    /// Reads are clamped to the buffer bounds, so cells hanging over an
    /// edge replicate the nearest edge pixel. Returns `false` once the scan
    /// area is exhausted; calling on an exhausted window leaves the cells
    /// untouched and keeps returning `false`.
    pub fn read(&mut self, source: &Raster, step: u32) -> bool {
        if self.cursor.y >= self.scan_height {
            return false;
        }
        for cx in 0..self.width {
            for cy in 0..self.height {
                let sx = self.cursor.x as i32 + cx as i32 - self.center_x as i32;
                let sy = self.cursor.y as i32 + cy as i32 - self.center_y as i32;
                let (r, g, b) = color::extract_rgb(source.get_pixel_clamped(sx, sy));
                let index = self.cell_index(cx, cy);
                self.cells[index] = color::compose_rgb(r, g, b);
            }
        }
        self.advance(step)
    }

    /// [`read`](Window::read) against a mutable buffer.
    ///
    /// In-place passes fill the window from the same buffer they are about
    /// to write, so the window observes repaints made earlier in the pass.
    pub fn read_in_place(&mut self, source: &RasterMut, step: u32) -> bool {
        if self.cursor.y >= self.scan_height {
            return false;
        }
        for cx in 0..self.width {
            for cy in 0..self.height {
                let sx = self.cursor.x as i32 + cx as i32 - self.center_x as i32;
                let sy = self.cursor.y as i32 + cy as i32 - self.center_y as i32;
                let (r, g, b) = color::extract_rgb(source.get_pixel_clamped(sx, sy));
                let index = self.cell_index(cx, cy);
                self.cells[index] = color::compose_rgb(r, g, b);
            }
        }
        self.advance(step)
    }

    /// Write every cell to `dest`, then advance the cursor by `step`.
    ///
    /// Target coordinates are clamped to the buffer bounds, so cells
    /// hanging over an edge collide on the clamped border pixel. Cells are
    /// written column by column; within a colliding group the
    /// highest-indexed cell lands last and wins. Returns `false` once the
    /// scan area is exhausted.
    pub fn write(&mut self, dest: &mut RasterMut, step: u32) -> bool {
        if self.cursor.y >= self.scan_height {
            return false;
        }
        for cx in 0..self.width {
            for cy in 0..self.height {
                let tx = self.cursor.x as i32 + cx as i32 - self.center_x as i32;
                let ty = self.cursor.y as i32 + cy as i32 - self.center_y as i32;
                dest.set_pixel_clamped(tx, ty, self.cells[self.cell_index(cx, cy)]);
            }
        }
        self.advance(step)
    }

    /// Copy the overlapping cells of `other` into this window.
    ///
    /// Fails when this window is larger than `other` in either dimension.
    pub fn copy_from(&mut self, other: &Window) -> ScaleResult<()> {
        if self.width > other.width || self.height > other.height {
            return Err(ScaleError::WindowMismatch(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        for cy in 0..self.height {
            for cx in 0..self.width {
                let index = self.cell_index(cx, cy);
                self.cells[index] = other.cells[other.cell_index(cx, cy)];
            }
        }
        Ok(())
    }

    /// Advance the cursor within the scan area.
    ///
    /// Moves `step` columns, capped at the row end; at the row end, moves
    /// `step` rows (capped at the bottom) and resets the column. Returns
    /// whether the cursor still points inside the scan area.
    fn advance(&mut self, step: u32) -> bool {
        self.cursor.x = (self.cursor.x + step).min(self.scan_width);
        if self.cursor.x == self.scan_width {
            self.cursor.y = (self.cursor.y + step).min(self.scan_height);
            self.cursor.x = 0;
        }
        self.cursor.y < self.scan_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retropix_core::color;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut m = RasterMut::new(width, height, false).unwrap();
        for y in 0..height {
            for x in 0..width {
                m.set_pixel_unchecked(x, y, color::compose_rgb(x as u8, y as u8, 0));
            }
        }
        m.into()
    }

    #[test]
    fn test_cells_follow_cursor_offset() {
        let src = gradient(4, 4);
        let mut win = Window::new(4, 4, 3, 3, 1, 1);

        assert!(win.read(&src, 1));
        // Cursor at (0, 0): the center cell is the cursor pixel.
        assert_eq!(win.get_unchecked(1, 1), color::compose_rgb(0, 0, 0));
        // Cells above/left of the buffer replicate the edge.
        assert_eq!(win.get_unchecked(0, 0), color::compose_rgb(0, 0, 0));
        assert_eq!(win.get_unchecked(2, 2), color::compose_rgb(1, 1, 0));

        assert!(win.read(&src, 1));
        // Cursor advanced to (1, 0).
        assert_eq!(win.get_unchecked(1, 1), color::compose_rgb(1, 0, 0));
        assert_eq!(win.get_unchecked(0, 1), color::compose_rgb(0, 0, 0));
    }

    #[test]
    fn test_read_scans_row_major() {
        let src = gradient(2, 2);
        let mut win = Window::new(2, 2, 1, 1, 0, 0);

        let mut seen = Vec::new();
        loop {
            let more = win.read(&src, 1);
            seen.push(win.get_unchecked(0, 0));
            if !more {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                color::compose_rgb(0, 0, 0),
                color::compose_rgb(1, 0, 0),
                color::compose_rgb(0, 1, 0),
                color::compose_rgb(1, 1, 0),
            ]
        );
    }

    #[test]
    fn test_read_exhausted_leaves_cells() {
        let src = gradient(1, 1);
        let mut win = Window::new(1, 1, 1, 1, 0, 0);

        assert!(!win.read(&src, 1));
        win.set_unchecked(0, 0, 0xdeadbeef);
        assert!(!win.read(&src, 1));
        assert_eq!(win.get_unchecked(0, 0), 0xdeadbeef);
    }

    #[test]
    fn test_stride_caps_at_row_end() {
        let src = gradient(3, 3);
        let mut win = Window::new(3, 3, 1, 1, 0, 0);

        assert!(win.read(&src, 2));
        assert_eq!((win.cursor_x(), win.cursor_y()), (2, 0));
        assert!(win.read(&src, 2));
        // 2 + 2 caps at the row end, wrapping to the next stride row.
        assert_eq!((win.cursor_x(), win.cursor_y()), (0, 2));
    }

    #[test]
    fn test_write_collision_order_at_border() {
        // A 3x3 window centered at (1, 1) writing at cursor (0, 0) pushes
        // four cells onto the clamped corner (0, 0); the column-by-column
        // order makes cell (1, 1) the last writer.
        let mut dest = RasterMut::new(2, 2, false).unwrap();
        let mut win = Window::new(2, 2, 3, 3, 1, 1);
        for cy in 0..3 {
            for cx in 0..3 {
                win.set_unchecked(cx, cy, color::compose_rgb((10 * cx + cy) as u8, 0, 0));
            }
        }

        assert!(win.write(&mut dest, 1));
        assert_eq!(
            dest.get_pixel(0, 0),
            Some(color::compose_rgb(11, 0, 0)),
            "cell (1, 1) wins the corner collision"
        );
    }

    #[test]
    fn test_write_restores_opacity() {
        let mut src = RasterMut::new(1, 1, true).unwrap();
        src.set_pixel_unchecked(0, 0, color::compose_rgba(5, 6, 7, 0));
        let src: Raster = src.into();

        let mut dest = RasterMut::new(1, 1, true).unwrap();
        let mut win = Window::new(1, 1, 1, 1, 0, 0);
        assert!(win.read(&src, 0));
        assert!(!win.write(&mut dest, 1));
        assert_eq!(dest.get_rgba(0, 0), Some((5, 6, 7, 255)));
    }

    #[test]
    fn test_copy_from_smaller_or_equal() {
        let src = gradient(4, 4);
        let mut big = Window::new(4, 4, 3, 3, 1, 1);
        big.read(&src, 1);

        let mut small = Window::new(4, 4, 2, 2, 0, 0);
        small.copy_from(&big).unwrap();
        assert_eq!(small.get_unchecked(1, 1), big.get_unchecked(1, 1));

        let mut too_big = Window::new(4, 4, 4, 4, 0, 0);
        assert!(too_big.copy_from(&big).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut win = Window::new(2, 2, 2, 2, 0, 0);
        assert_eq!(win.get(2, 0), None);
        assert!(win.set(0, 2, 1).is_err());
        assert!(win.set(1, 1, 7).is_ok());
        assert_eq!(win.get(1, 1), Some(7));
    }
}
