use nalgebra::Vector2;

#[inline]
pub(crate) fn angle_of(n: Vector2<f64>) -> f64 {
    n.y.atan2(n.x)
}

/// Angle of `p` seen from `c`, via four-quadrant arctangent, in (-π, π].
#[inline]
pub fn angle_about(p: Vector2<f64>, c: Vector2<f64>) -> f64 {
    angle_of(p - c)
}

/// Andrew’s monotone chain convex hull (returns hull in CCW order).
pub fn convex_hull(points: &[Vector2<f64>]) -> Option<Vec<Vector2<f64>>> {
    if points.len() < 2 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 2 {
        return None;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Some(hull)
}

/// Closed-membership test for a CCW convex hull (`eps` enlarges the hull).
pub fn hull_contains(hull: &[Vector2<f64>], p: Vector2<f64>, eps: f64) -> bool {
    if hull.len() < 3 {
        return false;
    }
    (0..hull.len()).all(|k| {
        let a = hull[k];
        let b = hull[(k + 1) % hull.len()];
        let edge = b - a;
        let len = edge.norm();
        len > 0.0 && cross(a, b, p) / len >= -eps
    })
}

/// z-component of (b - a) × (c - a); positive when a→b→c turns left.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
