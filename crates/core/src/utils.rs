//! Miscellaneous routines.
//!
//! Provides:
//! - Geometric types (Point, Matrix)
//! - Matrix composition and application
//! - HPGL number formatting

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Compares two matrices component-wise.
pub fn matrix_approx_eq(m1: Matrix, m0: Matrix, epsilon: f64) -> bool {
    approx_eq(m1.0, m0.0, epsilon)
        && approx_eq(m1.1, m0.1, epsilon)
        && approx_eq(m1.2, m0.2, epsilon)
        && approx_eq(m1.3, m0.3, epsilon)
        && approx_eq(m1.4, m0.4, epsilon)
        && approx_eq(m1.5, m0.5, epsilon)
}

/// Multiplies two matrices in row-vector order.
/// The result maps a point through m1 first, then m0.
pub fn mult_matrix(m1: Matrix, m0: Matrix) -> Matrix {
    let (a1, b1, c1, d1, e1, f1) = m1;
    let (a0, b0, c0, d0, e0, f0) = m0;
    (
        a0 * a1 + c0 * b1,
        b0 * a1 + d0 * b1,
        a0 * c1 + c0 * d1,
        b0 * c1 + d0 * d1,
        a0 * e1 + c0 * f1 + e0,
        b0 * e1 + d0 * f1 + f0,
    )
}

/// Translates a matrix by (x, y) inside the projection.
///
/// The matrix is changed so that its origin is at the specified point in its own
/// coordinate system. Note that this is different from translating it within the
/// original coordinate system.
pub fn translate_matrix(m: Matrix, v: Point) -> Matrix {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a, b, c, d, x * a + y * c + e, x * b + y * d + f)
}

/// Rotates a matrix by `angle` radians inside the projection.
///
/// Like [`translate_matrix`], the rotation happens in the matrix's own
/// coordinate frame: points are rotated first, then mapped through `m`.
pub fn rotate_matrix(m: Matrix, angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    mult_matrix((cos, sin, -sin, cos, 0.0, 0.0), m)
}

/// Applies a matrix to a point.
pub fn apply_matrix_pt(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Renders a number the way it appears in an HPGL parameter list.
///
/// Values are rounded to three decimals and trailing zeros are dropped, so
/// integral values print without a fractional part. Negative zero prints
/// as `0`.
pub fn format_number(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
