//! In-place cleanup passes
//!
//! Repair passes run after a block scaler to remove the artifacts its
//! equality rules leave behind: hairline fissures along repainted edges,
//! stray single pixels, and understated diagonal steps. Each pass sweeps
//! the buffer once at stride 1, reading and rewriting a small window, so
//! later windows observe the repaints of earlier ones.

use retropix_core::RasterMut;

use crate::window::Window;

/// Run one in-place pass: fill the window at the cursor, apply the rule to
/// the cells, write them back, advance one pixel.
fn run_cleanup_pass(buffer: &mut RasterMut, size: u32, center: u32, rule: impl Fn(&mut Window)) {
    let mut win = Window::new(buffer.width(), buffer.height(), size, size, center, center);
    loop {
        win.read_in_place(buffer, 0);
        rule(&mut win);
        if !win.write(buffer, 1) {
            break;
        }
    }
}

/// Close single-pixel diagonal fissures.
///
/// Where the center and two adjacent orthogonals form a thin crease of one
/// color fully surrounded by the corner color, repaint the crease to the
/// surrounding color. All four diagonal orientations are tested in order
/// against the evolving window.
pub fn fill_fissure(buffer: &mut RasterMut) {
    run_cleanup_pass(buffer, 3, 1, fill_fissure_rule);
}

/// Remove stray single pixels.
///
/// A center differing from four identical orthogonal neighbors is repainted
/// to the neighbor color.
pub fn fill_single(buffer: &mut RasterMut) {
    run_cleanup_pass(buffer, 3, 1, fill_single_rule);
}

/// Thicken two-pixel diagonal steps.
///
/// Where two diagonal pixels of one color cut through a field of another,
/// widen the diagonal by one pixel on each side so the step reads as a
/// line after doubling.
pub fn buff_double(buffer: &mut RasterMut) {
    run_cleanup_pass(buffer, 4, 1, buff_double_rule);
}

/// Thicken three-pixel diagonals, strict variant.
///
/// Repaints the four orthogonals of a three-pixel diagonal only when every
/// one of them differs from the diagonal color.
pub fn buff_triple_strict(buffer: &mut RasterMut) {
    run_cleanup_pass(buffer, 3, 1, buff_triple_strict_rule);
}

/// Thicken three-pixel diagonals, loose variant.
///
/// Like [`buff_triple_strict`] but each side pair of orthogonals is tested
/// and repainted independently.
pub fn buff_triple_loose(buffer: &mut RasterMut) {
    run_cleanup_pass(buffer, 3, 1, buff_triple_loose_rule);
}

fn fill_fissure_rule(win: &mut Window) {
    for dx in [-1i32, 1] {
        for dy in [-1i32, 1] {
            let xn = (1 + dx) as u32;
            let yn = (1 + dy) as u32;
            let xf = (1 - dx) as u32;
            let yf = (1 - dy) as u32;

            let a = win.get_unchecked(1, 1);
            let b = win.get_unchecked(xn, yn);
            if a == b {
                continue;
            }
            // The crease: center plus the two orthogonals toward the corner.
            if win.get_unchecked(xn, 1) != a || win.get_unchecked(1, yn) != a {
                continue;
            }
            // Everything around the crease carries the corner color.
            if win.get_unchecked(xf, 1) != b || win.get_unchecked(1, yf) != b {
                continue;
            }
            if win.get_unchecked(xf, yn) != b || win.get_unchecked(xn, yf) != b {
                continue;
            }
            win.set_unchecked(1, 1, b);
            win.set_unchecked(xn, 1, b);
            win.set_unchecked(1, yn, b);
        }
    }
}

fn fill_single_rule(win: &mut Window) {
    let c = win.get_unchecked(1, 1);
    let w = win.get_unchecked(0, 1);
    if c != w
        && w == win.get_unchecked(1, 0)
        && w == win.get_unchecked(2, 1)
        && w == win.get_unchecked(1, 2)
    {
        win.set_unchecked(1, 1, w);
    }
}

fn buff_double_rule(win: &mut Window) {
    // Rising diagonal through (2, 1) and (1, 2).
    let anchor = win.get_unchecked(2, 1);
    if anchor == win.get_unchecked(1, 2)
        && anchor != win.get_unchecked(0, 3)
        && anchor != win.get_unchecked(3, 0)
        && anchor != win.get_unchecked(1, 1)
        && anchor != win.get_unchecked(2, 2)
    {
        win.set_unchecked(1, 1, anchor);
        win.set_unchecked(2, 2, anchor);
    }

    // Falling diagonal through (1, 1) and (2, 2); sees the repaint above.
    let anchor = win.get_unchecked(1, 1);
    if anchor == win.get_unchecked(2, 2)
        && anchor != win.get_unchecked(0, 0)
        && anchor != win.get_unchecked(3, 3)
        && anchor != win.get_unchecked(2, 1)
        && anchor != win.get_unchecked(1, 2)
    {
        win.set_unchecked(2, 1, anchor);
        win.set_unchecked(1, 2, anchor);
    }
}

fn buff_triple_strict_rule(win: &mut Window) {
    // Falling diagonal.
    let anchor = win.get_unchecked(0, 0);
    if anchor == win.get_unchecked(1, 1) && anchor == win.get_unchecked(2, 2) {
        let w = win.get_unchecked(0, 1);
        let n = win.get_unchecked(1, 0);
        let e = win.get_unchecked(2, 1);
        let s = win.get_unchecked(1, 2);
        if anchor != w && anchor != n && anchor != e && anchor != s {
            win.set_unchecked(0, 1, anchor);
            win.set_unchecked(1, 0, anchor);
            win.set_unchecked(2, 1, anchor);
            win.set_unchecked(1, 2, anchor);
        }
    }

    // Rising diagonal; sees the repaints above.
    let anchor = win.get_unchecked(2, 0);
    if anchor == win.get_unchecked(1, 1) && anchor == win.get_unchecked(0, 2) {
        let w = win.get_unchecked(0, 1);
        let n = win.get_unchecked(1, 0);
        let e = win.get_unchecked(2, 1);
        let s = win.get_unchecked(1, 2);
        if anchor != w && anchor != n && anchor != e && anchor != s {
            win.set_unchecked(0, 1, anchor);
            win.set_unchecked(1, 0, anchor);
            win.set_unchecked(2, 1, anchor);
            win.set_unchecked(1, 2, anchor);
        }
    }
}

fn buff_triple_loose_rule(win: &mut Window) {
    // Falling diagonal: the west/north pair and the south/east pair widen
    // independently.
    let anchor = win.get_unchecked(0, 0);
    if anchor == win.get_unchecked(1, 1) && anchor == win.get_unchecked(2, 2) {
        if win.get_unchecked(0, 1) != anchor && win.get_unchecked(1, 0) != anchor {
            win.set_unchecked(0, 1, anchor);
            win.set_unchecked(1, 0, anchor);
        }
        if win.get_unchecked(1, 2) != anchor && win.get_unchecked(2, 1) != anchor {
            win.set_unchecked(1, 2, anchor);
            win.set_unchecked(2, 1, anchor);
        }
    }

    // Rising diagonal: west/south and north/east pairs.
    let anchor = win.get_unchecked(2, 0);
    if anchor == win.get_unchecked(1, 1) && anchor == win.get_unchecked(0, 2) {
        if win.get_unchecked(0, 1) != anchor && win.get_unchecked(1, 2) != anchor {
            win.set_unchecked(0, 1, anchor);
            win.set_unchecked(1, 2, anchor);
        }
        if win.get_unchecked(1, 0) != anchor && win.get_unchecked(2, 1) != anchor {
            win.set_unchecked(1, 0, anchor);
            win.set_unchecked(2, 1, anchor);
        }
    }
}
