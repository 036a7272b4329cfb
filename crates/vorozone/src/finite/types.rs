//! Data types for finite reconstruction: config, errors, adjacency rows, output.
//!
//! Kept small and explicit to make `adjacency`, `extend`, and `order` easy to read.

use std::fmt;

use nalgebra::Vector2;

use crate::diagram::{PointId, VertexId, VertexRef};

/// Reconstruction configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReconstructCfg {
    /// Far-point distance from the ridge's finite vertex. `None` selects
    /// `RADIUS_SPREAD_FACTOR × max(peak-to-peak spread of the generators)`.
    pub radius: Option<f64>,
}

impl ReconstructCfg {
    #[inline]
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius: Some(radius),
        }
    }
}

/// Default radius = this factor times the largest per-axis spread of the generators.
pub const RADIUS_SPREAD_FACTOR: f64 = 100.0;

/// Errors surfaced by the reconstruction. All are input precondition violations.
#[derive(Clone, Debug, PartialEq)]
pub enum ReconstructError {
    /// Generators (`what = "points"`) or vertices are not planar.
    InvalidDimension { what: &'static str, dim: usize },
    /// The two generators of an unbounded ridge coincide.
    DegenerateInput { p1: PointId, p2: PointId },
    /// The ridge midpoint is exactly on the line through the centroid along the
    /// ridge normal, so no outward side can be chosen.
    DegenerateRidge { p1: PointId, p2: PointId },
    /// Structural inconsistency in the diagram description.
    MalformedDiagram { reason: String },
    /// Effective radius is not a finite positive number.
    InvalidRadius { radius: f64 },
}

impl ReconstructError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDiagram {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReconstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { what, dim } => {
                write!(f, "only 2D input supported ({what} have dimension {dim})")
            }
            Self::DegenerateInput { p1, p2 } => write!(
                f,
                "generators {} and {} coincide; ridge tangent is undefined",
                p1.0, p2.0
            ),
            Self::DegenerateRidge { p1, p2 } => write!(
                f,
                "unbounded ridge between generators {} and {} has no outward side (midpoint on the centroid line)",
                p1.0, p2.0
            ),
            Self::MalformedDiagram { reason } => write!(f, "malformed diagram: {reason}"),
            Self::InvalidRadius { radius } => {
                write!(f, "extension radius must be finite and positive, got {radius}")
            }
        }
    }
}

impl std::error::Error for ReconstructError {}

/// One adjacency row: the ridge to `neighbor`, with its two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncidentRidge {
    pub neighbor: PointId,
    pub v1: VertexRef,
    pub v2: VertexRef,
}

impl IncidentRidge {
    /// The finite endpoint of an unbounded ridge (`None` if both are finite or both infinite).
    #[inline]
    pub fn ray_base(&self) -> Option<VertexId> {
        match (self.v1, self.v2) {
            (VertexRef::AtInfinity, VertexRef::Finite(v)) => Some(v),
            (VertexRef::Finite(v), VertexRef::AtInfinity) => Some(v),
            _ => None,
        }
    }
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.v1.is_infinite() || self.v2.is_infinite()
    }
}

/// Reconstructed diagram: one closed polygon per generator plus the extended vertex list.
///
/// Invariants:
/// - `vertices[..original_vertex_count]` equals the input vertices, in order.
/// - `regions[p]` belongs to generator `p` and contains no sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct FinitePolygons {
    pub regions: Vec<Vec<VertexId>>,
    pub vertices: Vec<Vector2<f64>>,
    pub original_vertex_count: usize,
}

impl FinitePolygons {
    /// Coordinates of generator `p`'s polygon, in output order.
    pub fn polygon(&self, p: PointId) -> Option<Vec<Vector2<f64>>> {
        let region = self.regions.get(p.0)?;
        region
            .iter()
            .map(|v| self.vertices.get(v.0).copied())
            .collect()
    }

    /// Appended far points (everything past the original vertices).
    #[inline]
    pub fn far_points(&self) -> &[Vector2<f64>] {
        &self.vertices[self.original_vertex_count..]
    }

    #[inline]
    pub fn is_far(&self, v: VertexId) -> bool {
        v.0 >= self.original_vertex_count
    }
}
