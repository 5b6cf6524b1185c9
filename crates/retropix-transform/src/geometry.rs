//! 2-D geometry primitives
//!
//! Points, rectangles, and the 3x3 homogeneous matrices that map the unit
//! square onto arbitrary quadrilaterals, plus the closed-form inverse of
//! the bilinear corner blend. Transforms are built from two unit-square
//! mappings chained through the square, so this module carries all of the
//! degeneracy handling: collapsed quads and singular matrices are hard
//! errors, never NaN pixels.

use crate::error::{TransformError, TransformResult};
use std::ops::{Add, Mul, Sub};

/// Threshold below which the inverse-bilinear quadratic is treated as
/// linear (parallelogram edges).
pub const GEOMETRY_EPSILON: f32 = 4.37114e-5;

/// A 2-D point (or vector) with `f32` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point from its coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// 2-D cross product: the z component of the 3-D cross product of
    /// `self` and `other` lifted into the plane.
    #[inline]
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// An axis-aligned rectangle spanning `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its extremes.
    #[inline]
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    /// Get the rectangle width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Get the rectangle height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Get the top-left corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Get the top-right corner.
    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.x1, self.y0)
    }

    /// Get the bottom-right corner.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the bottom-left corner.
    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.x0, self.y1)
    }

    /// Get the four corners clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }
}

/// A 3x3 homogeneous matrix in column-vector convention.
///
/// Entries are `m[row][col]`; transforming a point computes
/// `M * (x, y, 1)` and the caller divides by the z component for
/// projective matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f32; 3]; 3],
}

impl Matrix3 {
    /// The identity matrix.
    pub fn identity() -> Self {
        Matrix3 {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Matrix3) -> Matrix3 {
        let mut out = [[0.0f32; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += self.m[row][k] * other.m[k][col];
                }
                *cell = acc;
            }
        }
        Matrix3 { m: out }
    }

    /// Apply the matrix to `(x, y, 1)`.
    ///
    /// Returns the homogeneous `(x', y', z')`.
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32, f32) {
        let m = &self.m;
        (
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
            m[2][0] * x + m[2][1] * y + m[2][2],
        )
    }

    /// Invert the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] when the determinant
    /// vanishes.
    pub fn inverse(&self) -> TransformResult<Matrix3> {
        let m = &self.m;
        let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
        let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
        let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
        if det.abs() <= f32::MIN_POSITIVE {
            return Err(TransformError::SingularMatrix);
        }

        let inv = 1.0 / det;
        Ok(Matrix3 {
            m: [
                [
                    c00 * inv,
                    (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                    (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
                ],
                [
                    c01 * inv,
                    (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                    (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
                ],
                [
                    c02 * inv,
                    (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                    (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
                ],
            ],
        })
    }
}

/// Build the matrix mapping the unit square onto `quad`.
///
/// Corners run clockwise from the top-left: `(0, 0)` maps to `quad[0]`,
/// `(1, 0)` to `quad[1]`, `(1, 1)` to `quad[2]` and `(0, 1)` to
/// `quad[3]`. Parallelograms get a direct affine solve; other quads
/// derive the projective row from the diagonal cross products.
///
/// # Errors
///
/// Returns [`TransformError::DegenerateQuad`] when the edge-difference
/// cross product vanishes (self-intersecting or collapsed quads).
pub fn map_unit_square_to_quad(quad: &[Point; 4]) -> TransformResult<Matrix3> {
    let [q0, q1, q2, q3] = *quad;
    let p = q0 - q1 + q2 - q3;

    let (m00, m01, m10, m11, m20, m21);
    if p.x == 0.0 && p.y == 0.0 {
        // Parallelogram: the affine terms are plain edge differences.
        m00 = q1.x - q0.x;
        m01 = q2.x - q1.x;
        m10 = q1.y - q0.y;
        m11 = q2.y - q1.y;
        m20 = 0.0;
        m21 = 0.0;
    } else {
        let d1 = q1 - q2;
        let d2 = q3 - q2;
        let del = d1.cross(d2);
        if del == 0.0 {
            return Err(TransformError::DegenerateQuad);
        }
        m20 = p.cross(d2) / del;
        m21 = d1.cross(p) / del;
        m00 = q1.x - q0.x + m20 * q1.x;
        m01 = q3.x - q0.x + m21 * q3.x;
        m10 = q1.y - q0.y + m20 * q1.y;
        m11 = q3.y - q0.y + m21 * q3.y;
    }

    Ok(Matrix3 {
        m: [[m00, m01, q0.x], [m10, m11, q0.y], [m20, m21, 1.0]],
    })
}

/// Blend the quad corners bilinearly at `(u, v)`.
///
/// `(0, 0)` yields `quad[0]` and `(1, 1)` yields `quad[2]`; this is the
/// forward map that [`inv_bilinear`] inverts.
pub fn forward_bilinear(u: f32, v: f32, quad: &[Point; 4]) -> Point {
    let [q0, q1, q2, q3] = *quad;
    q0 * ((1.0 - u) * (1.0 - v)) + q1 * (u * (1.0 - v)) + q2 * (u * v) + q3 * ((1.0 - u) * v)
}

/// Solve the bilinear corner blend for `(u, v)` at `point`.
///
/// The blend reduces to a quadratic in `u` whose coefficients are cross
/// products of corner differences; `v` then follows linearly on
/// whichever axis avoids a near-zero division. The solve runs in `f64`.
/// When the quadratic coefficient falls below [`GEOMETRY_EPSILON`]
/// (parallelogram edges) the linear fallback applies; of the two
/// quadratic roots, the `+` root is preferred and the `-` root taken
/// when it lands outside `[0, 1]`.
///
/// Points outside the quad come back with coordinates outside `[0, 1]`
/// rather than failing; callers reject them.
pub fn inv_bilinear(point: Point, quad: &[Point; 4]) -> (f32, f32) {
    #[inline]
    fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
        ax * by - ay * bx
    }

    let (px, py) = (f64::from(point.x), f64::from(point.y));
    let (q0x, q0y) = (f64::from(quad[0].x), f64::from(quad[0].y));
    let (q1x, q1y) = (f64::from(quad[1].x), f64::from(quad[1].y));
    let (q2x, q2y) = (f64::from(quad[2].x), f64::from(quad[2].y));
    let (q3x, q3y) = (f64::from(quad[3].x), f64::from(quad[3].y));

    // Left and right edge vectors, top corner minus bottom corner.
    let e0x = q0x - q3x;
    let e0y = q0y - q3y;
    let e1x = q1x - q2x;
    let e1y = q1y - q2y;

    let a = cross(q0x - px, q0y - py, e0x, e0y);
    let b = (cross(q0x - px, q0y - py, e1x, e1y) + cross(q1x - px, q1y - py, e0x, e0y)) / 2.0;
    let c = cross(q1x - px, q1y - py, e1x, e1y);

    let div = a - 2.0 * b + c;
    let u = if div.abs() < f64::from(GEOMETRY_EPSILON) {
        if a - c != 0.0 { a / (a - c) } else { 0.0 }
    } else {
        let root = (b * b - a * c).sqrt();
        let plus = (a - b + root) / div;
        if (0.0..=1.0).contains(&plus) {
            plus
        } else {
            (a - b - root) / div
        }
    };

    let vdiv_x = (1.0 - u) * e0x + u * e1x;
    let vdiv_y = (1.0 - u) * e0y + u * e1y;
    let v = if vdiv_x.abs() > vdiv_y.abs() {
        ((1.0 - u) * q0x + u * q1x - px) / vdiv_x
    } else if vdiv_y != 0.0 {
        ((1.0 - u) * q0y + u * q1y - py) / vdiv_y
    } else {
        0.0
    };

    (u as f32, v as f32)
}
