//! Closed-form Voronoi diagrams used in tests and benchmarks.
//!
//! Purpose
//! - Provide diagrams whose vertices and ridges are known exactly, so tests do
//!   not depend on a diagram constructor.
//! - Regions are stored with an unused empty region at index 0 and
//!   `point_region[p] = p + 1`, the layout common Voronoi constructors emit.
//!
//! Families
//! - `unit_square`: generators at the corners of [0,1]²; one vertex at the
//!   center, four rays, every cell open.
//! - `wheel`: a hub generator plus `spokes` generators on a ring of radius `r`.
//!   The Delaunay triangulation is the fan around the hub, so the hub cell is a
//!   regular `spokes`-gon with circumradius `r / (2 cos(π/spokes))` and every rim
//!   cell is open with two finite vertices and two rays.

pub mod rand;

use nalgebra::Vector2;

use crate::diagram::{PointId, PointSet, RegionId, VertexId, VertexRef, VoronoiDiagram};

/// Four generators at the corners of the unit square.
pub fn unit_square() -> VoronoiDiagram {
    let inf = VertexRef::AtInfinity;
    let v0 = VertexRef::Finite(VertexId(0));
    VoronoiDiagram {
        points: PointSet::from_rows(2, &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]),
        vertices: PointSet::from_rows(2, &[[0.5, 0.5]]),
        regions: vec![vec![], vec![inf, v0], vec![inf, v0], vec![inf, v0], vec![inf, v0]],
        ridge_points: vec![
            (PointId(0), PointId(1)),
            (PointId(0), PointId(2)),
            (PointId(1), PointId(3)),
            (PointId(2), PointId(3)),
        ],
        ridge_vertices: vec![(inf, v0); 4],
        point_region: (1..=4).map(RegionId).collect(),
    }
}

/// Hub at `center` (generator 0) plus `spokes` rim generators (ids `1..=spokes`)
/// at angles `phase + 2πk/spokes` on a ring of radius `ring_radius`.
///
/// Pre: `spokes >= 3`, `ring_radius > 0`.
pub fn wheel(spokes: usize, ring_radius: f64, center: Vector2<f64>, phase: f64) -> VoronoiDiagram {
    debug_assert!(spokes >= 3, "a wheel needs at least 3 spokes");
    let n = spokes;
    let step = std::f64::consts::TAU / n as f64;
    let vertex_dist = ring_radius / (2.0 * (std::f64::consts::PI / n as f64).cos());

    let mut points = Vec::with_capacity(n + 1);
    points.push(center);
    for k in 0..n {
        let th = phase + step * k as f64;
        points.push(center + Vector2::new(th.cos(), th.sin()) * ring_radius);
    }
    // vertex k sits between rim generators k and k+1
    let vertices: Vec<Vector2<f64>> = (0..n)
        .map(|k| {
            let phi = phase + step * (k as f64 + 0.5);
            center + Vector2::new(phi.cos(), phi.sin()) * vertex_dist
        })
        .collect();

    let rim = |k: usize| PointId(1 + k % n);
    let vert = |k: usize| VertexRef::Finite(VertexId(k % n));
    let mut ridge_points = Vec::with_capacity(2 * n);
    let mut ridge_vertices = Vec::with_capacity(2 * n);
    for k in 0..n {
        ridge_points.push((PointId(0), rim(k)));
        ridge_vertices.push((vert(k + n - 1), vert(k)));
        ridge_points.push((rim(k), rim(k + 1)));
        ridge_vertices.push((VertexRef::AtInfinity, vert(k)));
    }

    let mut regions = Vec::with_capacity(n + 2);
    regions.push(Vec::new());
    regions.push((0..n).map(vert).collect());
    for k in 0..n {
        regions.push(vec![VertexRef::AtInfinity, vert(k + n - 1), vert(k)]);
    }

    VoronoiDiagram {
        points: PointSet::from_planar(&points),
        vertices: PointSet::from_planar(&vertices),
        regions,
        ridge_points,
        ridge_vertices,
        point_region: (1..=n + 1).map(RegionId).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn wheel_vertices_are_equidistant_from_their_generators() {
        let vd = wheel(7, 2.0, vector![1.0, -3.0], 0.3);
        let pts = vd.points.to_planar().unwrap();
        let verts = vd.vertices.to_planar().unwrap();
        assert_eq!(pts.len(), 8);
        assert_eq!(verts.len(), 7);
        // vertex k is the circumcenter of (hub, rim k, rim k+1)
        for (k, v) in verts.iter().enumerate() {
            let dh = (v - pts[0]).norm();
            let d1 = (v - pts[1 + k]).norm();
            let d2 = (v - pts[1 + (k + 1) % 7]).norm();
            assert!((dh - d1).abs() < 1e-9 && (dh - d2).abs() < 1e-9);
        }
        assert_eq!(vd.num_unbounded_ridges(), 7);
        assert_eq!(vd.ridge_points.len(), vd.ridge_vertices.len());
    }

    #[test]
    fn unit_square_is_all_open() {
        let vd = unit_square();
        for p in 0..4 {
            let region = vd.region_of(PointId(p)).unwrap();
            assert!(region.contains(&VertexRef::AtInfinity));
        }
        assert_eq!(vd.num_unbounded_ridges(), 4);
    }
}
