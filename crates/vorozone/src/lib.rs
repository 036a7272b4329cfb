//! Finite reconstruction of planar Voronoi diagrams.
//!
//! Turns the unbounded cells of a Voronoi diagram into closed polygons (zones)
//! by synthesizing far vertices, so every cell can be rendered, measured, or
//! joined spatially.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - The `cli` crate is the only consumer; breaking changes are fine when they
//!   improve clarity.

pub mod api;
pub mod diagram;
pub mod finite;
pub mod geom2;
pub mod samples;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diagram::{PointId, PointSet, RegionId, VertexId, VertexRef, VoronoiDiagram};
    pub use crate::finite::{
        reconstruct, reconstruct_with_radius, FinitePolygons, ReconstructCfg, ReconstructError,
    };
    pub use crate::geom2::{area, is_simple, signed_area};
    pub use nalgebra::Vector2 as Vec2;
}
