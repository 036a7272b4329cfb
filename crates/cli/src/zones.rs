//! Stop zones: one finite Voronoi polygon per stop location.
//!
//! Stops are planar sites with `x = stop_lon`, `y = stop_lat`. Stops sharing
//! exact coordinates share one site (and therefore one zone polygon); stops
//! without usable coordinates are skipped with a warning.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use vorozone::api::{area, closed_ring, reconstruct, PointId, ReconstructCfg};
use vorozone::Vec2;

use crate::voronoi::build_diagram;

/// One stop and the polygon of its site.
#[derive(Clone, Debug, Serialize)]
pub struct Zone {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub zone_id: Option<String>,
    pub site: usize,
    /// Closed ring of `[lon, lat]` pairs.
    pub ring: Vec<[f64; 2]>,
    pub area: f64,
}

/// A stop row reduced to what zone building needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub zone_id: Option<String>,
    pub pos: Vec2<f64>,
}

/// Extract stops with parseable coordinates from a cleaned `stops` table.
pub fn stops_from_frame(df: &DataFrame) -> Result<Vec<Stop>> {
    let ids = df.column("stop_id").context("stops table")?.str()?;
    let lats = df.column("stop_lat").context("stops table")?.str()?;
    let lons = df.column("stop_lon").context("stops table")?.str()?;
    let names = optional_str_column(df, "stop_name")?;
    let zone_ids = optional_str_column(df, "zone_id")?;

    let mut stops = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(stop_id) = ids.get(i) else {
            tracing::warn!(row = i, "stop without stop_id skipped");
            continue;
        };
        let lat = lats.get(i).and_then(|s| s.parse::<f64>().ok());
        let lon = lons.get(i).and_then(|s| s.parse::<f64>().ok());
        let (Some(lat), Some(lon)) = (lat, lon) else {
            tracing::warn!(stop_id, "stop without usable coordinates skipped");
            continue;
        };
        stops.push(Stop {
            stop_id: stop_id.to_string(),
            stop_name: names.and_then(|c| c.get(i)).map(str::to_string),
            zone_id: zone_ids
                .and_then(|c| c.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            pos: Vec2::new(lon, lat),
        });
    }
    Ok(stops)
}

fn optional_str_column<'a>(df: &'a DataFrame, name: &str) -> Result<Option<&'a StringChunked>> {
    match df.get_column_index(name) {
        Some(_) => Ok(Some(df.column(name)?.str()?)),
        None => Ok(None),
    }
}

/// Assign each stop a site index; stops with identical coordinates share a site.
pub fn dedup_sites(stops: &[Stop]) -> (Vec<Vec2<f64>>, Vec<usize>) {
    let mut sites: Vec<Vec2<f64>> = Vec::new();
    let mut by_bits = std::collections::HashMap::new();
    let mut site_of = Vec::with_capacity(stops.len());
    for s in stops {
        let key = (s.pos.x.to_bits(), s.pos.y.to_bits());
        let idx = *by_bits.entry(key).or_insert_with(|| {
            sites.push(s.pos);
            sites.len() - 1
        });
        site_of.push(idx);
    }
    (sites, site_of)
}

/// Build one zone per stop.
pub fn build_zones(stops: &[Stop], radius: Option<f64>) -> Result<Vec<Zone>> {
    let (sites, site_of) = dedup_sites(stops);
    if sites.len() < stops.len() {
        tracing::info!(
            stops = stops.len(),
            sites = sites.len(),
            "stops_sharing_coordinates"
        );
    }
    if sites.len() < 3 {
        bail!("need at least 3 distinct stop locations, got {}", sites.len());
    }
    let vd = build_diagram(&sites)?;
    tracing::info!(
        sites = vd.num_points(),
        vertices = vd.vertices.len(),
        ridges = vd.ridge_points.len(),
        unbounded = vd.num_unbounded_ridges(),
        "voronoi_diagram"
    );
    let polys = reconstruct(&vd, ReconstructCfg { radius })?;
    tracing::info!(
        far_points = polys.far_points().len(),
        "finite_polygons"
    );

    stops
        .iter()
        .zip(site_of)
        .map(|(s, site)| {
            let p = PointId(site);
            let ring = closed_ring(&polys, p).context("site without polygon")?;
            let coords = polys.polygon(p).unwrap_or_default();
            Ok(Zone {
                stop_id: s.stop_id.clone(),
                stop_name: s.stop_name.clone(),
                zone_id: s.zone_id.clone(),
                site,
                ring,
                area: area(&coords),
            })
        })
        .collect()
}

/// GeoJSON-style feature collection (polygons in `[lon, lat]`).
pub fn to_feature_collection(zones: &[Zone]) -> Value {
    let features: Vec<Value> = zones
        .iter()
        .map(|z| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [z.ring] },
                "properties": {
                    "stop_id": z.stop_id,
                    "stop_name": z.stop_name,
                    "zone_id": z.zone_id,
                    "site": z.site,
                    "area": z.area,
                }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vorozone::api::is_simple;

    fn stop(id: &str, x: f64, y: f64) -> Stop {
        Stop {
            stop_id: id.to_string(),
            stop_name: None,
            zone_id: None,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn shared_coordinates_share_a_site() {
        let stops = vec![
            stop("a", 0.0, 0.0),
            stop("b", 1.0, 0.0),
            stop("a2", 0.0, 0.0),
            stop("c", 0.2, 1.0),
        ];
        let (sites, site_of) = dedup_sites(&stops);
        assert_eq!(sites.len(), 3);
        assert_eq!(site_of, vec![0, 1, 0, 2]);

        let zones = build_zones(&stops, Some(10.0)).unwrap();
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].ring, zones[2].ring);
        for z in &zones {
            assert_eq!(z.ring.first(), z.ring.last());
            assert!(z.area > 0.0);
        }
    }

    #[test]
    fn square_of_stops_gives_simple_rings() {
        let stops = vec![
            stop("sw", 0.0, 0.0),
            stop("se", 1.0, 0.0),
            stop("nw", 0.0, 1.0),
            stop("ne", 1.0, 1.0),
        ];
        let zones = build_zones(&stops, Some(10.0)).unwrap();
        assert_eq!(zones.len(), 4);
        for z in &zones {
            let open: Vec<Vec2<f64>> = z.ring[..z.ring.len() - 1]
                .iter()
                .map(|&[x, y]| Vec2::new(x, y))
                .collect();
            assert_eq!(open.len(), 3, "stop {}", z.stop_id);
            assert!(is_simple(&open), "stop {} ring {:?}", z.stop_id, z.ring);
            assert!((z.area - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn too_few_locations_fail() {
        let stops = vec![stop("a", 0.0, 0.0), stop("b", 0.0, 0.0), stop("c", 1.0, 1.0)];
        assert!(build_zones(&stops, None).is_err());
    }

    #[test]
    fn frame_rows_without_coordinates_are_skipped() {
        let df = df!(
            "stop_id" => ["S1", "S2", "S3"],
            "stop_name" => ["One", "Two", "Three"],
            "stop_lat" => ["0.5", "", "1.5"],
            "stop_lon" => ["10.0", "11.0", "x"],
            "zone_id" => ["Z", "", "Z"]
        )
        .unwrap();
        let stops = stops_from_frame(&df).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].stop_id, "S1");
        assert_eq!(stops[0].pos, Vec2::new(10.0, 0.5));
        assert_eq!(stops[0].zone_id.as_deref(), Some("Z"));
    }

    #[test]
    fn feature_collection_shape() {
        let z = Zone {
            stop_id: "S1".into(),
            stop_name: Some("One".into()),
            zone_id: None,
            site: 0,
            ring: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]],
            area: 0.5,
        };
        let fc = to_feature_collection(&[z]);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(fc["features"][0]["properties"]["stop_id"], "S1");
        assert_eq!(fc["features"][0]["geometry"]["coordinates"][0][1][0], 1.0);
    }
}
