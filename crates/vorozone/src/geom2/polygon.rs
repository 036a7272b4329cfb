//! Vertex-list polygons: area, centroid, and simplicity checks.
//!
//! Polygons here are closed rings given as vertex sequences without the
//! repeated first vertex.

use nalgebra::Vector2;

use super::util::cross;

/// Mean of the vertices (not the area centroid). Zero for an empty slice.
pub fn vertex_centroid(vs: &[Vector2<f64>]) -> Vector2<f64> {
    if vs.is_empty() {
        return Vector2::zeros();
    }
    vs.iter().fold(Vector2::zeros(), |acc, v| acc + v) / vs.len() as f64
}

/// Shoelace signed area; positive for counterclockwise rings.
pub fn signed_area(vs: &[Vector2<f64>]) -> f64 {
    let n = vs.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for k in 0..n {
        let a = vs[k];
        let b = vs[(k + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    0.5 * twice
}

#[inline]
pub fn area(vs: &[Vector2<f64>]) -> f64 {
    signed_area(vs).abs()
}

/// True iff the closed ring has ≥ 3 vertices, non-zero area, and no two
/// non-adjacent edges touch.
pub fn is_simple(vs: &[Vector2<f64>]) -> bool {
    let n = vs.len();
    if n < 3 || signed_area(vs) == 0.0 {
        return false;
    }
    for i in 0..n {
        let (a, b) = (vs[i], vs[(i + 1) % n]);
        for j in (i + 1)..n {
            // skip edges sharing a vertex with edge i
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (c, d) = (vs[j], vs[(j + 1) % n]);
            if segments_touch(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

fn segments_touch(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, d: Vector2<f64>) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}

#[inline]
fn on_segment(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
