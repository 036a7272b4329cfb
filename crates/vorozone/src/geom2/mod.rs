//! Small 2D geometry on `nalgebra::Vector2<f64>`.
//!
//! Purpose
//! - Explicit planar helpers used by the finite reconstruction (angles, vertex
//!   means) and by consumers of its output (area, simplicity, hull checks).
//! - Keep the API minimal and numerically explicit; no tolerance is hidden
//!   except where a parameter says so.
//!
//! Code cross-refs: `finite::angular_order`, `FinitePolygons::polygon`

mod polygon;
mod util;

pub use polygon::{area, is_simple, signed_area, vertex_centroid};
pub use util::{angle_about, convex_hull, cross, hull_contains};
