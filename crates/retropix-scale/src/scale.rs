//! Pattern-matching upscalers
//!
//! Integer-factor upscalers that decide each output pixel by exact equality
//! tests on a small source neighborhood, preserving hard pixel-art edges
//! instead of blending across them.

use retropix_core::{Raster, RasterMut};

use crate::{ScaleResult, cleanup, window::Window};

/// Upscaling algorithm selection
///
/// The `Hq` variants run the base scaler followed by in-place cleanup
/// passes that repair artifacts the block rules leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMethod {
    /// Identity copy
    None,
    /// Scale2x block rule (2x)
    Scale2x,
    /// Scale3x block rule (3x)
    Scale3x,
    /// Scale2x applied twice (4x)
    Scale4x,
    /// Eagle block rule (2x)
    Eagle2x,
    /// Scale2x plus single-pixel and double-buff cleanup (2x)
    Scale2xHq,
    /// Scale3x plus fissure and strict triple-buff cleanup (3x)
    Scale3xHq,
    /// Scale2x, cleanup, then an Eagle pass on the intermediate (4x)
    Scale4xHq,
}

impl ScaleMethod {
    /// Get the integer magnification factor of this method.
    #[inline]
    pub fn factor(&self) -> u32 {
        match self {
            ScaleMethod::None => 1,
            ScaleMethod::Scale2x => 2,
            ScaleMethod::Scale3x => 3,
            ScaleMethod::Scale4x => 4,
            ScaleMethod::Eagle2x => 2,
            ScaleMethod::Scale2xHq => 2,
            ScaleMethod::Scale3xHq => 3,
            ScaleMethod::Scale4xHq => 4,
        }
    }
}

/// Upscale an image with the given method.
///
/// The output is `(factor * width, factor * height)` with the alpha flag
/// copied from the source. Every method except `None` produces opaque
/// pixels; `None` returns the source unchanged.
pub fn scale(source: &Raster, method: ScaleMethod) -> ScaleResult<Raster> {
    match method {
        ScaleMethod::None => Ok(source.clone()),
        ScaleMethod::Scale2x => Ok(scale2x_pass(source)?.into()),
        ScaleMethod::Scale3x => Ok(scale3x_pass(source)?.into()),
        ScaleMethod::Scale4x => {
            let doubled: Raster = scale2x_pass(source)?.into();
            Ok(scale2x_pass(&doubled)?.into())
        }
        ScaleMethod::Eagle2x => Ok(eagle2x_pass(source)?.into()),
        ScaleMethod::Scale2xHq => {
            let mut work = scale2x_pass(source)?;
            cleanup::fill_single(&mut work);
            cleanup::buff_double(&mut work);
            Ok(work.into())
        }
        ScaleMethod::Scale3xHq => {
            let mut work = scale3x_pass(source)?;
            cleanup::fill_fissure(&mut work);
            cleanup::buff_triple_strict(&mut work);
            Ok(work.into())
        }
        ScaleMethod::Scale4xHq => {
            let mut work = scale2x_pass(source)?;
            cleanup::fill_single(&mut work);
            cleanup::buff_double(&mut work);
            let doubled: Raster = work.into();
            Ok(eagle2x_pass(&doubled)?.into())
        }
    }
}

/// Run one block-rule pass: a 3x3 source window swept at stride 1 feeding a
/// `factor` x `factor` destination window swept at stride `factor`.
///
/// Both windows exhaust on the same iteration, so the destination cursor
/// drives the loop.
fn run_block_pass(
    source: &Raster,
    dest: &mut RasterMut,
    factor: u32,
    rule: impl Fn(&Window, &mut Window),
) {
    let mut src_win = Window::new(source.width(), source.height(), 3, 3, 1, 1);
    let mut dst_win = Window::new(dest.width(), dest.height(), factor, factor, 0, 0);
    loop {
        src_win.read(source, 1);
        rule(&src_win, &mut dst_win);
        if !dst_win.write(dest, factor) {
            break;
        }
    }
}

fn scale2x_pass(source: &Raster) -> ScaleResult<RasterMut> {
    let mut dest = RasterMut::new(source.width() * 2, source.height() * 2, source.has_alpha())?;
    run_block_pass(source, &mut dest, 2, scale2x_block);
    Ok(dest)
}

fn scale3x_pass(source: &Raster) -> ScaleResult<RasterMut> {
    let mut dest = RasterMut::new(source.width() * 3, source.height() * 3, source.has_alpha())?;
    run_block_pass(source, &mut dest, 3, scale3x_block);
    Ok(dest)
}

fn eagle2x_pass(source: &Raster) -> ScaleResult<RasterMut> {
    let mut dest = RasterMut::new(source.width() * 2, source.height() * 2, source.has_alpha())?;
    run_block_pass(source, &mut dest, 2, eagle2x_block);
    Ok(dest)
}

/// Scale2x rule: expand the center pixel into a 2x2 block, pulling in an
/// orthogonal neighbor at each corner where the two adjacent orthogonals
/// agree and the opposing pairs differ.
fn scale2x_block(src: &Window, dst: &mut Window) {
    let c = src.get_unchecked(1, 1);
    let n = src.get_unchecked(1, 0);
    let s = src.get_unchecked(1, 2);
    let w = src.get_unchecked(0, 1);
    let e = src.get_unchecked(2, 1);

    let prereq = n != s && w != e;
    dst.set_unchecked(0, 0, if prereq && w == n { w } else { c });
    dst.set_unchecked(1, 0, if prereq && n == e { e } else { c });
    dst.set_unchecked(0, 1, if prereq && w == s { w } else { c });
    dst.set_unchecked(1, 1, if prereq && s == e { e } else { c });
}

/// Scale3x rule: the 3x3 expansion of Scale2x. Corners follow the Scale2x
/// conditions; edge midpoints additionally test the diagonal opposite each
/// candidate so detail pixels survive.
fn scale3x_block(src: &Window, dst: &mut Window) {
    let c = src.get_unchecked(1, 1);
    let n = src.get_unchecked(1, 0);
    let s = src.get_unchecked(1, 2);
    let w = src.get_unchecked(0, 1);
    let e = src.get_unchecked(2, 1);
    let nw = src.get_unchecked(0, 0);
    let ne = src.get_unchecked(2, 0);
    let sw = src.get_unchecked(0, 2);
    let se = src.get_unchecked(2, 2);

    let prereq = n != s && w != e;
    let w_is_n = w == n;
    let n_is_e = n == e;
    let w_is_s = w == s;
    let s_is_e = s == e;
    let c_not_nw = c != nw;
    let c_not_ne = c != ne;
    let c_not_sw = c != sw;
    let c_not_se = c != se;

    dst.set_unchecked(0, 0, if prereq && w_is_n { w } else { c });
    dst.set_unchecked(
        1,
        0,
        if prereq && ((w_is_n && c_not_ne) || (n_is_e && c_not_nw)) {
            n
        } else {
            c
        },
    );
    dst.set_unchecked(2, 0, if prereq && n_is_e { e } else { c });
    dst.set_unchecked(
        0,
        1,
        if prereq && ((w_is_n && c_not_sw) || (w_is_s && c_not_nw)) {
            w
        } else {
            c
        },
    );
    dst.set_unchecked(1, 1, c);
    dst.set_unchecked(
        2,
        1,
        if prereq && ((n_is_e && c_not_se) || (s_is_e && c_not_ne)) {
            e
        } else {
            c
        },
    );
    dst.set_unchecked(0, 2, if prereq && w_is_s { w } else { c });
    dst.set_unchecked(
        1,
        2,
        if prereq && ((w_is_s && c_not_se) || (s_is_e && c_not_sw)) {
            s
        } else {
            c
        },
    );
    dst.set_unchecked(2, 2, if prereq && s_is_e { e } else { c });
}

/// Eagle rule: each corner of the 2x2 block takes the diagonal neighbor
/// when both orthogonals beside it agree with that diagonal.
fn eagle2x_block(src: &Window, dst: &mut Window) {
    let c = src.get_unchecked(1, 1);
    let n = src.get_unchecked(1, 0);
    let s = src.get_unchecked(1, 2);
    let w = src.get_unchecked(0, 1);
    let e = src.get_unchecked(2, 1);
    let nw = src.get_unchecked(0, 0);
    let ne = src.get_unchecked(2, 0);
    let sw = src.get_unchecked(0, 2);
    let se = src.get_unchecked(2, 2);

    dst.set_unchecked(0, 0, if w == nw && n == nw { nw } else { c });
    dst.set_unchecked(1, 0, if n == ne && e == ne { ne } else { c });
    dst.set_unchecked(0, 1, if w == sw && s == sw { sw } else { c });
    dst.set_unchecked(1, 1, if e == se && s == se { se } else { c });
}

#[cfg(test)]
mod tests {
    use super::*;
    use retropix_core::color;

    fn from_rgb(width: u32, height: u32, rgb: &[(u8, u8, u8)]) -> Raster {
        let mut m = RasterMut::new(width, height, false).unwrap();
        for (i, &(r, g, b)) in rgb.iter().enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            m.set_rgb(x, y, r, g, b).unwrap();
        }
        m.into()
    }

    #[test]
    fn test_factor() {
        assert_eq!(ScaleMethod::None.factor(), 1);
        assert_eq!(ScaleMethod::Scale2x.factor(), 2);
        assert_eq!(ScaleMethod::Scale3x.factor(), 3);
        assert_eq!(ScaleMethod::Scale4x.factor(), 4);
        assert_eq!(ScaleMethod::Eagle2x.factor(), 2);
        assert_eq!(ScaleMethod::Scale4xHq.factor(), 4);
    }

    #[test]
    fn test_none_is_identity() {
        let src = from_rgb(2, 1, &[(1, 2, 3), (4, 5, 6)]);
        let out = scale(&src, ScaleMethod::None).unwrap();
        assert!(out.sizes_equal(&src));
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(0, 0));
        assert_eq!(out.get_pixel(1, 0), src.get_pixel(1, 0));
    }

    #[test]
    fn test_scale2x_uniform_stays_uniform() {
        let mut m = RasterMut::new(3, 3, false).unwrap();
        m.fill(color::compose_rgb(9, 9, 9));
        let src: Raster = m.into();

        let out = scale(&src, ScaleMethod::Scale2x).unwrap();
        assert_eq!(out.width(), 6);
        assert_eq!(out.height(), 6);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(out.get_rgb(x, y), Some((9, 9, 9)));
            }
        }
    }

    #[test]
    fn test_scale2x_block_rule() {
        // Distinct 3x3 pattern with W == N: the top-left output of the
        // center block pulls in W, the rest keep the center.
        let a = (1, 0, 0);
        let b = (2, 0, 0);
        let c = (3, 0, 0);
        let d = (2, 0, 0); // D == B
        let e = (5, 0, 0);
        let f = (6, 0, 0);
        let g = (7, 0, 0);
        let h = (8, 0, 0);
        let i = (9, 0, 0);
        let src = from_rgb(3, 3, &[a, b, c, d, e, f, g, h, i]);

        let out = scale(&src, ScaleMethod::Scale2x).unwrap();
        // Center block occupies (2..4, 2..4).
        assert_eq!(out.get_rgb(2, 2), Some(d));
        assert_eq!(out.get_rgb(3, 2), Some(e));
        assert_eq!(out.get_rgb(2, 3), Some(e));
        assert_eq!(out.get_rgb(3, 3), Some(e));
    }

    #[test]
    fn test_eagle2x_rounds_diagonals() {
        let x = (9, 9, 9);
        let b = (1, 1, 1);
        let src = from_rgb(3, 3, &[x, x, b, x, b, b, b, b, b]);

        let out = scale(&src, ScaleMethod::Eagle2x).unwrap();
        // The center block's top-left corner sees W == NW == N and takes
        // the diagonal color; the other three corners keep the center.
        assert_eq!(out.get_rgb(2, 2), Some(x));
        assert_eq!(out.get_rgb(3, 2), Some(b));
        assert_eq!(out.get_rgb(2, 3), Some(b));
        assert_eq!(out.get_rgb(3, 3), Some(b));
    }

    #[test]
    fn test_eagle2x_eats_single_pixels() {
        // A lone center pixel on a uniform background satisfies every
        // corner condition and vanishes. Known Eagle behavior.
        let bg = (1, 1, 1);
        let fg = (9, 9, 9);
        let src = from_rgb(3, 3, &[bg, bg, bg, bg, fg, bg, bg, bg, bg]);

        let out = scale(&src, ScaleMethod::Eagle2x).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(out.get_rgb(x, y), Some(bg));
            }
        }
    }

    #[test]
    fn test_scale3x_center_always_source() {
        let src = from_rgb(
            3,
            3,
            &[
                (1, 0, 0),
                (2, 0, 0),
                (3, 0, 0),
                (4, 0, 0),
                (5, 0, 0),
                (6, 0, 0),
                (7, 0, 0),
                (8, 0, 0),
                (9, 0, 0),
            ],
        );
        let out = scale(&src, ScaleMethod::Scale3x).unwrap();
        assert_eq!(out.width(), 9);
        for sy in 0..3 {
            for sx in 0..3 {
                let expect = src.get_rgb(sx, sy);
                assert_eq!(out.get_rgb(sx * 3 + 1, sy * 3 + 1), expect);
            }
        }
    }

    #[test]
    fn test_scale4x_is_scale2x_twice() {
        let src = from_rgb(
            2,
            2,
            &[(10, 0, 0), (20, 0, 0), (30, 0, 0), (40, 0, 0)],
        );
        let quad = scale(&src, ScaleMethod::Scale4x).unwrap();
        let twice = scale(&scale(&src, ScaleMethod::Scale2x).unwrap(), ScaleMethod::Scale2x).unwrap();
        assert!(quad.sizes_equal(&twice));
        for y in 0..quad.height() {
            for x in 0..quad.width() {
                assert_eq!(quad.get_pixel(x, y), twice.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_one_pixel_source() {
        let src = from_rgb(1, 1, &[(42, 0, 0)]);
        for method in [
            ScaleMethod::Scale2x,
            ScaleMethod::Scale3x,
            ScaleMethod::Scale4x,
            ScaleMethod::Eagle2x,
            ScaleMethod::Scale2xHq,
            ScaleMethod::Scale3xHq,
            ScaleMethod::Scale4xHq,
        ] {
            let out = scale(&src, method).unwrap();
            let f = method.factor();
            assert_eq!(out.width(), f);
            assert_eq!(out.height(), f);
            for y in 0..f {
                for x in 0..f {
                    assert_eq!(out.get_rgb(x, y), Some((42, 0, 0)), "{method:?}");
                }
            }
        }
    }
}
