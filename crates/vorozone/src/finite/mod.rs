//! Finite reconstruction of unbounded Voronoi cells.
//!
//! Purpose
//! - Turn every cell of a planar Voronoi diagram into a closed polygon over an
//!   extended vertex list, leaving already-finite cells untouched.
//!
//! Pipeline (per call, no shared mutable state)
//! - `adjacency`: generator → incident ridges.
//! - `extend`: one far point per unbounded ridge of an open cell, pushed
//!   `radius` away from the ridge's finite vertex along the outward normal.
//! - `order`: angle-sort each open cell around its vertex mean.
//!
//! Open cells are closed into private buffers and merged in generator order, so
//! far-point ids match a sequential append exactly.
//!
//! Code cross-refs: `diagram::VoronoiDiagram`, `geom2::{vertex_centroid, angle_about}`

mod adjacency;
mod extend;
mod order;
mod types;

pub use adjacency::{build_adjacency, Adjacency};
pub use extend::{centroid, default_radius, extend_cell, far_direction, ExtendCtx, Member, OpenCell};
pub use order::angular_order;
pub use types::{
    FinitePolygons, IncidentRidge, ReconstructCfg, ReconstructError, RADIUS_SPREAD_FACTOR,
};

use nalgebra::Vector2;

use crate::diagram::{PointId, VertexId, VertexRef, VoronoiDiagram};

/// Cell outcome before merge.
enum Cell<'a> {
    /// Finite, non-empty input region (kept verbatim).
    Kept(&'a [VertexRef]),
    /// Reconstructed cell, members already in angular order.
    Closed(OpenCell),
}

/// Reconstruct finite polygons for every generator of `vd`.
///
/// Pre: `vd` is a consistent planar diagram (distinct ridge generators, ids in range).
/// Post: see `FinitePolygons` invariants; fails at the first violation with no partial output.
pub fn reconstruct(
    vd: &VoronoiDiagram,
    cfg: ReconstructCfg,
) -> Result<FinitePolygons, ReconstructError> {
    let points = vd
        .points
        .to_planar()
        .ok_or(ReconstructError::InvalidDimension {
            what: "points",
            dim: vd.points.dim,
        })?;
    let vertices = vd
        .vertices
        .to_planar()
        .ok_or(ReconstructError::InvalidDimension {
            what: "vertices",
            dim: vd.vertices.dim,
        })?;
    if vd.point_region.len() != points.len() {
        return Err(ReconstructError::malformed(format!(
            "{} generators but {} point→region entries",
            points.len(),
            vd.point_region.len()
        )));
    }

    let radius = cfg.radius.unwrap_or_else(|| default_radius(&points));
    if !(radius.is_finite() && radius > 0.0) {
        return Err(ReconstructError::InvalidRadius { radius });
    }
    let center = centroid(&points);
    let adj = build_adjacency(points.len(), &vd.ridge_points, &vd.ridge_vertices)?;
    let ctx = ExtendCtx {
        points: &points,
        vertices: &vertices,
        center,
        radius,
    };

    let cells = (0..points.len())
        .map(|p| close_cell(&ctx, vd, &adj, PointId(p)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(merge(vertices, cells, 2 * vd.num_unbounded_ridges()))
}

/// Shorthand for `reconstruct` with an optional explicit radius.
#[inline]
pub fn reconstruct_with_radius(
    vd: &VoronoiDiagram,
    radius: Option<f64>,
) -> Result<FinitePolygons, ReconstructError> {
    reconstruct(vd, ReconstructCfg { radius })
}

fn close_cell<'a>(
    ctx: &ExtendCtx<'_>,
    vd: &'a VoronoiDiagram,
    adj: &Adjacency,
    p: PointId,
) -> Result<Cell<'a>, ReconstructError> {
    let region = vd.region_of(p).ok_or_else(|| {
        ReconstructError::malformed(format!("generator {} has no region", p.0))
    })?;
    if !region.is_empty() && region.iter().all(|v| !v.is_infinite()) {
        return Ok(Cell::Kept(region));
    }
    let ridges = &adj[p.0];
    if ridges.is_empty() {
        return Err(ReconstructError::malformed(format!(
            "open region of generator {} has no incident ridges",
            p.0
        )));
    }
    let mut cell = extend_cell(ctx, p, region, ridges)?;
    let coords: Vec<Vector2<f64>> = cell
        .members
        .iter()
        .map(|&m| cell.coord(m, ctx.vertices))
        .collect();
    let perm = angular_order(&coords);
    cell.members = perm.into_iter().map(|k| cell.members[k]).collect();
    Ok(Cell::Closed(cell))
}

fn merge(mut vertices: Vec<Vector2<f64>>, cells: Vec<Cell<'_>>, far_hint: usize) -> FinitePolygons {
    let original_vertex_count = vertices.len();
    vertices.reserve(far_hint);
    let mut regions = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Cell::Kept(region) => {
                regions.push(region.iter().filter_map(|v| v.finite()).collect());
            }
            Cell::Closed(open) => {
                let offset = vertices.len();
                vertices.extend_from_slice(&open.far);
                regions.push(
                    open.members
                        .iter()
                        .map(|m| match *m {
                            Member::Existing(v) => v,
                            Member::Far(k) => VertexId(offset + k),
                        })
                        .collect(),
                );
            }
        }
    }
    FinitePolygons {
        regions,
        vertices,
        original_vertex_count,
    }
}
