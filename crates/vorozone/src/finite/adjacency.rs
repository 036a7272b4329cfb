use crate::diagram::{PointId, VertexRef};

use super::types::{IncidentRidge, ReconstructError};

/// Generator id → incident ridges, in ridge order.
pub type Adjacency = Vec<Vec<IncidentRidge>>;

/// Index ridges by generator. Each ridge is inserted once for each of its two generators.
pub fn build_adjacency(
    num_points: usize,
    ridge_points: &[(PointId, PointId)],
    ridge_vertices: &[(VertexRef, VertexRef)],
) -> Result<Adjacency, ReconstructError> {
    if ridge_points.len() != ridge_vertices.len() {
        return Err(ReconstructError::malformed(format!(
            "{} ridge point pairs but {} ridge vertex pairs",
            ridge_points.len(),
            ridge_vertices.len()
        )));
    }
    let mut adj: Adjacency = vec![Vec::new(); num_points];
    for (k, (&(p1, p2), &(v1, v2))) in ridge_points.iter().zip(ridge_vertices).enumerate() {
        if v1.is_infinite() && v2.is_infinite() {
            return Err(ReconstructError::malformed(format!(
                "ridge {k} has both endpoints at infinity"
            )));
        }
        if p1.0 >= num_points || p2.0 >= num_points {
            return Err(ReconstructError::malformed(format!(
                "ridge {k} references generator ({}, {}) but only {num_points} exist",
                p1.0, p2.0
            )));
        }
        adj[p1.0].push(IncidentRidge {
            neighbor: p2,
            v1,
            v2,
        });
        adj[p2.0].push(IncidentRidge {
            neighbor: p1,
            v1,
            v2,
        });
    }
    Ok(adj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::VertexId;

    #[test]
    fn symmetric_insertion() {
        let rp = [(PointId(0), PointId(1)), (PointId(1), PointId(2))];
        let rv = [
            (VertexRef::AtInfinity, VertexRef::Finite(VertexId(0))),
            (VertexRef::Finite(VertexId(0)), VertexRef::Finite(VertexId(1))),
        ];
        let adj = build_adjacency(3, &rp, &rv).unwrap();
        assert_eq!(adj[0].len(), 1);
        assert_eq!(adj[1].len(), 2);
        assert_eq!(adj[2].len(), 1);
        assert_eq!(adj[0][0].neighbor, PointId(1));
        assert_eq!(adj[1][0].neighbor, PointId(0));
        assert_eq!(adj[1][1].neighbor, PointId(2));
        assert_eq!(adj[0][0].ray_base(), Some(VertexId(0)));
        assert!(adj[2][0].ray_base().is_none());
    }

    #[test]
    fn double_sentinel_is_malformed() {
        let rp = [(PointId(0), PointId(1))];
        let rv = [(VertexRef::AtInfinity, VertexRef::AtInfinity)];
        let err = build_adjacency(2, &rp, &rv).unwrap_err();
        assert!(matches!(err, ReconstructError::MalformedDiagram { .. }));
    }

    #[test]
    fn out_of_range_generator_is_malformed() {
        let rp = [(PointId(0), PointId(5))];
        let rv = [(VertexRef::AtInfinity, VertexRef::Finite(VertexId(0)))];
        assert!(matches!(
            build_adjacency(2, &rp, &rv),
            Err(ReconstructError::MalformedDiagram { .. })
        ));
    }

    #[test]
    fn mismatched_ridge_sequences_are_malformed() {
        let rp = [(PointId(0), PointId(1))];
        assert!(matches!(
            build_adjacency(2, &rp, &[]),
            Err(ReconstructError::MalformedDiagram { .. })
        ));
    }
}
