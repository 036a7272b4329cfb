//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   benchmarks. Breaking changes are allowed and expected.

// Diagram model
pub use crate::diagram::{PointId, PointSet, RegionId, VertexId, VertexRef, VoronoiDiagram};
// Reconstruction
pub use crate::finite::{
    angular_order, build_adjacency, default_radius, far_direction, reconstruct,
    reconstruct_with_radius, FinitePolygons, ReconstructCfg, ReconstructError,
};
// 2D helpers
pub use crate::geom2::{area, convex_hull, hull_contains, is_simple, signed_area, vertex_centroid};
// Fixtures
pub use crate::samples::rand::{draw_wheel, ReplayToken, SpokeCount, WheelCfg, WheelSample};
pub use crate::samples::{unit_square, wheel};

use nalgebra::Vector2;

/// Zone polygon coordinates for generator `p` as `[x, y]` pairs, closed
/// (first vertex repeated at the end), ready for GeoJSON-style output.
pub fn closed_ring(out: &FinitePolygons, p: PointId) -> Option<Vec<[f64; 2]>> {
    let ring: Vec<Vector2<f64>> = out.polygon(p)?;
    let mut coords: Vec<[f64; 2]> = ring.iter().map(|v| [v.x, v.y]).collect();
    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    Some(coords)
}
