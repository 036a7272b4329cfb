//! Voronoi diagram of planar sites via spade's Delaunay triangulation.
//!
//! Voronoi vertices are the circumcenters of the inner triangles; each Delaunay
//! edge is a ridge whose endpoints are the circumcenters of the triangles on
//! either side, with the outer face mapped to `VertexRef::AtInfinity`. Regions
//! list the faces around each site in the order spade walks its out-edges.
//!
//! Cocircular sites (a rectangle, a grid) triangulate into several faces with
//! one circumcenter. Adjacent faces whose circumcenters agree within
//! `MERGE_TOLERANCE × site extent` share a single vertex, and the zero-length
//! ridges between them are dropped.

use anyhow::{anyhow, bail, Result};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use vorozone::diagram::{PointId, PointSet, RegionId, VertexId, VertexRef, VoronoiDiagram};
use vorozone::Vec2;

/// Relative distance below which adjacent circumcenters are one Voronoi vertex.
pub const MERGE_TOLERANCE: f64 = 1e-10;

/// Build the Voronoi diagram of `sites`; site `i` becomes generator `i`.
///
/// Fails for fewer than 3 sites, coincident sites, or an all-collinear set.
pub fn build_diagram(sites: &[Vec2<f64>]) -> Result<VoronoiDiagram> {
    if sites.len() < 3 {
        bail!("need at least 3 distinct sites, got {}", sites.len());
    }
    let mut tri: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for (i, s) in sites.iter().enumerate() {
        let h = tri
            .insert(Point2::new(s.x, s.y))
            .map_err(|e| anyhow!("site {i} at ({}, {}): {e:?}", s.x, s.y))?;
        if h.index() != i {
            bail!("site {i} coincides with site {}", h.index());
        }
    }
    if tri.num_inner_faces() == 0 {
        bail!("all {} sites are collinear", sites.len());
    }

    let centers: Vec<Option<Vec2<f64>>> = {
        let mut c = vec![None; tri.num_all_faces()];
        for face in tri.inner_faces() {
            let cc = face.circumcenter();
            c[face.fix().index()] = Some(Vec2::new(cc.x, cc.y));
        }
        c
    };
    let eps = MERGE_TOLERANCE * site_extent(sites);
    let mut parent: Vec<usize> = (0..centers.len()).collect();
    for edge in tri.undirected_edges() {
        let d = edge.as_directed();
        let (f, g) = (d.face().fix().index(), d.rev().face().fix().index());
        if let (Some(a), Some(b)) = (centers[f], centers[g]) {
            if (a - b).norm() <= eps {
                let (rf, rg) = (find(&mut parent, f), find(&mut parent, g));
                parent[rg] = rf;
            }
        }
    }

    // fixed face index → Voronoi vertex; the outer face stays None
    let mut face_vertex: Vec<Option<VertexId>> = vec![None; centers.len()];
    let mut root_vertex: Vec<Option<VertexId>> = vec![None; centers.len()];
    let mut vertices = Vec::with_capacity(tri.num_inner_faces());
    for face in tri.inner_faces() {
        let f = face.fix().index();
        let root = find(&mut parent, f);
        let id = *root_vertex[root].get_or_insert_with(|| {
            let c = face.circumcenter();
            vertices.push(Vec2::new(c.x, c.y));
            VertexId(vertices.len() - 1)
        });
        face_vertex[f] = Some(id);
    }
    let merged = tri.num_inner_faces() - vertices.len();
    if merged > 0 {
        tracing::debug!(
            faces = tri.num_inner_faces(),
            vertices = vertices.len(),
            "merged_cocircular_faces"
        );
    }
    let vref = |face_index: usize| {
        face_vertex[face_index].map_or(VertexRef::AtInfinity, VertexRef::Finite)
    };

    let mut ridge_points = Vec::with_capacity(tri.num_undirected_edges());
    let mut ridge_vertices = Vec::with_capacity(tri.num_undirected_edges());
    for edge in tri.undirected_edges() {
        let [a, b] = edge.vertices();
        let d = edge.as_directed();
        let v1 = vref(d.face().fix().index());
        let v2 = vref(d.rev().face().fix().index());
        if v1 == v2 && v1.finite().is_some() {
            continue;
        }
        ridge_points.push((PointId(a.fix().index()), PointId(b.fix().index())));
        ridge_vertices.push((v1, v2));
    }

    let regions: Vec<Vec<VertexRef>> = tri
        .vertices()
        .map(|v| {
            let mut region: Vec<VertexRef> = Vec::new();
            for e in v.out_edges() {
                let r = vref(e.face().fix().index());
                if region.last() != Some(&r) {
                    region.push(r);
                }
            }
            if region.len() > 1 && region.first() == region.last() {
                region.pop();
            }
            region
        })
        .collect();

    Ok(VoronoiDiagram {
        points: PointSet::from_planar(sites),
        vertices: PointSet::from_planar(&vertices),
        regions,
        ridge_points,
        ridge_vertices,
        point_region: (0..sites.len()).map(RegionId).collect(),
    })
}

/// Root of `i` in the face union-find, halving paths on the way.
fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Larger side of the sites' bounding box.
fn site_extent(sites: &[Vec2<f64>]) -> f64 {
    let Some(first) = sites.first() else {
        return 0.0;
    };
    let (lo, hi) = sites[1..]
        .iter()
        .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    let d = hi - lo;
    d.x.max(d.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vorozone::api::{is_simple, reconstruct, ReconstructCfg};

    // R2 low-discrepancy sequence: well spread, no exact cocircularity
    fn r2_sites(n: usize) -> Vec<Vec2<f64>> {
        (1..=n)
            .map(|k| {
                let k = k as f64;
                Vec2::new((k * 0.754_877_666).fract() * 10.0, (k * 0.569_840_291).fract() * 10.0)
            })
            .collect()
    }

    #[test]
    fn triangle_has_one_vertex_and_three_rays() {
        let sites = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)];
        let vd = build_diagram(&sites).unwrap();
        assert_eq!(vd.vertices.len(), 1);
        assert_eq!(vd.ridge_points.len(), 3);
        assert_eq!(vd.num_unbounded_ridges(), 3);
        let v = vd.vertices.to_planar().unwrap()[0];
        assert!((v - Vec2::new(1.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn interior_sites_get_finite_regions() {
        let vd = build_diagram(&r2_sites(24)).unwrap();
        let finite = (0..vd.num_points())
            .filter(|&p| {
                let region = vd.region_of(PointId(p)).unwrap();
                !region.is_empty() && region.iter().all(|v| !v.is_infinite())
            })
            .count();
        assert!(finite > 0);
        assert!(finite < vd.num_points());
        let out = reconstruct(&vd, ReconstructCfg::default()).unwrap();
        for p in 0..vd.num_points() {
            let ring = out.polygon(PointId(p)).unwrap();
            assert!(is_simple(&ring), "site {p}");
        }
    }

    #[test]
    fn square_corners_share_one_vertex() {
        let sites = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        let vd = build_diagram(&sites).unwrap();
        assert_eq!(vd.vertices.len(), 1);
        let v = vd.vertices.to_planar().unwrap()[0];
        assert!((v - Vec2::new(0.5, 0.5)).norm() < 1e-12);
        // the diagonal collapses; only the four hull rays remain
        assert_eq!(vd.ridge_points.len(), 4);
        assert_eq!(vd.num_unbounded_ridges(), 4);
        for p in 0..4 {
            let region = vd.region_of(PointId(p)).unwrap();
            assert_eq!(region.len(), 2, "site {p} region {region:?}");
        }
        let out = reconstruct(&vd, ReconstructCfg::with_radius(10.0)).unwrap();
        for p in 0..4 {
            let ring = out.polygon(PointId(p)).unwrap();
            assert_eq!(ring.len(), 3);
            assert!(is_simple(&ring), "site {p} ring {ring:?}");
        }
    }

    #[test]
    fn grid_cells_are_simple() {
        let sites: Vec<Vec2<f64>> = (0..4)
            .flat_map(|i| (0..3).map(move |j| Vec2::new(i as f64, j as f64)))
            .collect();
        let vd = build_diagram(&sites).unwrap();
        // one vertex per unit square of the grid
        assert_eq!(vd.vertices.len(), 3 * 2);
        let out = reconstruct(&vd, ReconstructCfg::default()).unwrap();
        for p in 0..sites.len() {
            let ring = out.polygon(PointId(p)).unwrap();
            assert!(is_simple(&ring), "site {p} ring {ring:?}");
        }
        // interior sites (1,1) and (2,1) keep their square cells
        let interior = out.polygon(PointId(4)).unwrap();
        assert_eq!(interior.len(), 4);
    }

    #[test]
    fn degenerate_site_sets_are_rejected() {
        let two = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert!(build_diagram(&two).is_err());
        let dup = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)];
        assert!(build_diagram(&dup).is_err());
        let line = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(build_diagram(&line).is_err());
    }
}
