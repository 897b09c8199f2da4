//! Curve flattening helpers.
//!
//! Cubic Bézier segments are sampled uniformly in parameter space. Catmull-Rom
//! segments are first converted to the equivalent Bézier control polygon.

use crate::utils::Point;

/// Four control points of a cubic Bézier segment.
pub type Curve4 = [Point; 4];

/// Convert the Catmull-Rom segment running from `p1` to `p2` into a cubic
/// Bézier. `p0` and `p3` are the neighbouring control points.
pub fn catrom_to_bezier(p0: Point, p1: Point, p2: Point, p3: Point) -> Curve4 {
    [
        p1,
        (
            (-p0.0 + 6.0 * p1.0 + p2.0) / 6.0,
            (-p0.1 + 6.0 * p1.1 + p2.1) / 6.0,
        ),
        (
            (p1.0 + 6.0 * p2.0 - p3.0) / 6.0,
            (p1.1 + 6.0 * p2.1 - p3.1) / 6.0,
        ),
        p2,
    ]
}

/// Evaluate a cubic Bézier at parameter `t` in `[0, 1]`.
pub fn bezier_point(c: &Curve4, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let d = 3.0 * mt * t * t;
    let e = t * t * t;
    (
        a * c[0].0 + b * c[1].0 + d * c[2].0 + e * c[3].0,
        a * c[0].1 + b * c[1].1 + d * c[2].1 + e * c[3].1,
    )
}

/// Sample `steps` points along a Bézier, excluding the start point and
/// ending exactly on the last control point.
pub fn flatten_bezier(c: &Curve4, steps: u32) -> Vec<Point> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(steps as usize);
    for i in 1..steps {
        out.push(bezier_point(c, f64::from(i) / f64::from(steps)));
    }
    out.push(c[3]);
    out
}

/// Flatten a Catmull-Rom spline through `points`.
///
/// The first and last points only steer the tangents; the returned polyline
/// starts on `points[1]` and ends on `points[n - 2]`. Fewer than four points
/// produce no output.
pub fn flatten_catmull_rom(points: &[Point], steps: u32) -> Vec<Point> {
    if points.len() < 4 {
        return Vec::new();
    }
    let mut out = vec![points[1]];
    for w in points.windows(4) {
        let seg = catrom_to_bezier(w[0], w[1], w[2], w[3]);
        out.extend(flatten_bezier(&seg, steps));
    }
    out
}
