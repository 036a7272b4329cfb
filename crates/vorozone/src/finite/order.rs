use nalgebra::Vector2;

use crate::geom2::{angle_about, vertex_centroid};

/// Permutation that sorts `coords` by angle around their mean, ascending in (-π, π].
///
/// Stable: equal angles keep their input order. Yields a simple polygon when the
/// points are star-shaped around their mean (always true for convex cells).
pub fn angular_order(coords: &[Vector2<f64>]) -> Vec<usize> {
    let c = vertex_centroid(coords);
    let keys: Vec<f64> = coords.iter().map(|p| angle_about(*p, c)).collect();
    let mut perm: Vec<usize> = (0..coords.len()).collect();
    perm.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn sorts_counterclockwise_from_negative_x_axis() {
        // scrambled unit square
        let pts = [
            vector![1.0, 1.0],
            vector![0.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 0.0],
        ];
        let perm = angular_order(&pts);
        // angles about (0.5,0.5): (0,0) -3π/4, (1,0) -π/4, (1,1) π/4, (0,1) 3π/4
        assert_eq!(perm, vec![1, 3, 0, 2]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let pts = [
            vector![2.0, 0.0],
            vector![-1.0, 0.0],
            vector![2.0, 0.0],
            vector![-1.0, 0.0],
        ];
        let perm = angular_order(&pts);
        assert_eq!(perm, vec![0, 2, 1, 3]);
    }

    #[test]
    fn empty_and_single() {
        assert!(angular_order(&[]).is_empty());
        assert_eq!(angular_order(&[vector![3.0, 4.0]]), vec![0]);
    }
}
