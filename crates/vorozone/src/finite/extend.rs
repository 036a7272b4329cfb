//! Ray extension: close an open cell with one far point per unbounded ridge.
//!
//! Far points are collected into a cell-local buffer and referenced by local
//! index; `finite::reconstruct` assigns global ids when merging cells in
//! generator order.

use nalgebra::Vector2;

use crate::diagram::{PointId, VertexId, VertexRef};

use super::types::{IncidentRidge, ReconstructError, RADIUS_SPREAD_FACTOR};

/// Read-only inputs shared by all cells of one reconstruction.
#[derive(Clone, Copy, Debug)]
pub struct ExtendCtx<'a> {
    pub points: &'a [Vector2<f64>],
    pub vertices: &'a [Vector2<f64>],
    pub center: Vector2<f64>,
    pub radius: f64,
}

/// Cell member before merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Member {
    Existing(VertexId),
    /// Index into `OpenCell::far`.
    Far(usize),
}

/// Closed-but-unordered cell with its private far-point buffer.
#[derive(Clone, Debug, Default)]
pub struct OpenCell {
    pub members: Vec<Member>,
    pub far: Vec<Vector2<f64>>,
}

impl OpenCell {
    #[inline]
    pub fn coord(&self, m: Member, vertices: &[Vector2<f64>]) -> Vector2<f64> {
        match m {
            Member::Existing(v) => vertices[v.0],
            Member::Far(k) => self.far[k],
        }
    }
}

/// Arithmetic mean of the generators.
pub fn centroid(points: &[Vector2<f64>]) -> Vector2<f64> {
    if points.is_empty() {
        return Vector2::zeros();
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}

/// `RADIUS_SPREAD_FACTOR × max(ptp_x, ptp_y)`; zero for fewer than two distinct points.
pub fn default_radius(points: &[Vector2<f64>]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (mut lo, mut hi) = (*first, *first);
    for p in &points[1..] {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    let ptp = hi - lo;
    ptp.x.max(ptp.y) * RADIUS_SPREAD_FACTOR
}

/// Unit direction in which the ridge between `p1` and `p2` escapes to infinity.
///
/// Normal of the generator tangent, signed to point away from `center`.
pub fn far_direction(
    points: &[Vector2<f64>],
    p1: PointId,
    p2: PointId,
    center: Vector2<f64>,
) -> Result<Vector2<f64>, ReconstructError> {
    let a = points[p1.0];
    let b = points[p2.0];
    let diff = b - a;
    let len = diff.norm();
    if !(len.is_finite() && len > 0.0) {
        return Err(ReconstructError::DegenerateInput { p1, p2 });
    }
    let t = diff / len;
    let n = Vector2::new(-t.y, t.x);
    let mid = (a + b) * 0.5;
    let side = (mid - center).dot(&n);
    let s = if side > 0.0 {
        1.0
    } else if side < 0.0 {
        -1.0
    } else {
        return Err(ReconstructError::DegenerateRidge { p1, p2 });
    };
    Ok(n * s)
}

/// Collect the finite vertices of `region` and extend every unbounded ridge of `p1`.
///
/// Post: member count = finite vertices of `region` + unbounded ridges in `ridges`.
pub fn extend_cell(
    ctx: &ExtendCtx<'_>,
    p1: PointId,
    region: &[VertexRef],
    ridges: &[IncidentRidge],
) -> Result<OpenCell, ReconstructError> {
    let mut cell = OpenCell::default();
    for v in region.iter().filter_map(|v| v.finite()) {
        check_vertex(ctx, v)?;
        cell.members.push(Member::Existing(v));
    }
    for r in ridges.iter().filter(|r| r.is_unbounded()) {
        let Some(base) = r.ray_base() else {
            return Err(ReconstructError::malformed(format!(
                "ridge between generators {} and {} has no finite endpoint",
                p1.0, r.neighbor.0
            )));
        };
        check_vertex(ctx, base)?;
        let d = far_direction(ctx.points, p1, r.neighbor, ctx.center)?;
        cell.members.push(Member::Far(cell.far.len()));
        cell.far.push(ctx.vertices[base.0] + d * ctx.radius);
    }
    Ok(cell)
}

#[inline]
fn check_vertex(ctx: &ExtendCtx<'_>, v: VertexId) -> Result<(), ReconstructError> {
    if v.0 < ctx.vertices.len() {
        Ok(())
    } else {
        Err(ReconstructError::malformed(format!(
            "vertex {} out of range ({} vertices)",
            v.0,
            ctx.vertices.len()
        )))
    }
}
