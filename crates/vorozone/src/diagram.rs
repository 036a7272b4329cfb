//! Voronoi diagram description as handed over by an upstream constructor.
//!
//! Purpose
//! - Carry the raw diagram (generators, vertices, regions, ridges) in the
//!   conventional "index + sentinel" layout without interpreting it.
//! - Keep coordinates in a row-major `PointSet` with an explicit dimension so the
//!   reconstruction can reject non-planar input instead of silently truncating.
//!
//! Code cross-refs: `finite::reconstruct`, `samples::{unit_square, wheel}`

use nalgebra::Vector2;

/// Generator (input site) index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);
/// Finite vertex index into the (possibly extended) vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
/// Region index into `VoronoiDiagram::regions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// Vertex reference inside a region or ridge; `AtInfinity` is the sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexRef {
    Finite(VertexId),
    AtInfinity,
}

impl VertexRef {
    /// Raw convention: any negative index is the vertex at infinity.
    #[inline]
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            VertexRef::AtInfinity
        } else {
            VertexRef::Finite(VertexId(raw as usize))
        }
    }
    #[inline]
    pub fn finite(self) -> Option<VertexId> {
        match self {
            VertexRef::Finite(v) => Some(v),
            VertexRef::AtInfinity => None,
        }
    }
    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, VertexRef::AtInfinity)
    }
}

impl From<VertexId> for VertexRef {
    #[inline]
    fn from(v: VertexId) -> Self {
        VertexRef::Finite(v)
    }
}

/// Row-major coordinate buffer: point `i` is `coords[i*dim .. (i+1)*dim]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    pub dim: usize,
    pub coords: Vec<f64>,
}

impl PointSet {
    /// Build from rows; all rows must share one length (checked by `debug_assert`).
    pub fn from_rows<R: AsRef<[f64]>>(dim: usize, rows: &[R]) -> Self {
        let mut coords = Vec::with_capacity(rows.len() * dim);
        for r in rows {
            let r = r.as_ref();
            debug_assert_eq!(r.len(), dim, "row length must equal dim");
            coords.extend_from_slice(r);
        }
        Self { dim, coords }
    }

    pub fn from_planar(points: &[Vector2<f64>]) -> Self {
        let mut coords = Vec::with_capacity(points.len() * 2);
        for p in points {
            coords.push(p.x);
            coords.push(p.y);
        }
        Self { dim: 2, coords }
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.coords.len() / self.dim
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Planar view; `None` unless `dim == 2` and the buffer is whole rows.
    pub fn to_planar(&self) -> Option<Vec<Vector2<f64>>> {
        if self.dim != 2 || self.coords.len() % 2 != 0 {
            return None;
        }
        Some(
            self.coords
                .chunks_exact(2)
                .map(|c| Vector2::new(c[0], c[1]))
                .collect(),
        )
    }
}

/// Planar Voronoi diagram in "regions + ridges" form.
///
/// Invariants (assumed, checked where cheap):
/// - `ridge_points[i]` and `ridge_vertices[i]` describe the same ridge.
/// - A ridge has at most one `AtInfinity` endpoint.
/// - Every generator has exactly one region (`point_region[p]`).
#[derive(Clone, Debug, Default)]
pub struct VoronoiDiagram {
    pub points: PointSet,
    pub vertices: PointSet,
    pub regions: Vec<Vec<VertexRef>>,
    pub ridge_points: Vec<(PointId, PointId)>,
    pub ridge_vertices: Vec<(VertexRef, VertexRef)>,
    pub point_region: Vec<RegionId>,
}

impl VoronoiDiagram {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of ridges with an endpoint at infinity.
    pub fn num_unbounded_ridges(&self) -> usize {
        self.ridge_vertices
            .iter()
            .filter(|(a, b)| a.is_infinite() || b.is_infinite())
            .count()
    }

    /// Region of generator `p`, if both indices are in range.
    pub fn region_of(&self, p: PointId) -> Option<&[VertexRef]> {
        let r = self.point_region.get(p.0)?;
        self.regions.get(r.0).map(|v| v.as_slice())
    }
}
