//! Print the reconstructed zones of the unit-square diagram.
//!
//! Usage:
//!   cargo run -p vorozone --example square_zones -- [radius]
//!
//! Prints one line per generator with its vertex ids, coordinates, and area.

use vorozone::api::{area, closed_ring, reconstruct, unit_square, PointId, ReconstructCfg};

fn main() {
    let radius = std::env::args().nth(1).and_then(|s| s.parse::<f64>().ok());
    let vd = unit_square();
    let out = match reconstruct(&vd, ReconstructCfg { radius }) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("reconstruction failed: {e}");
            std::process::exit(1);
        }
    };
    for (p, region) in out.regions.iter().enumerate() {
        let ring = out.polygon(PointId(p)).unwrap_or_default();
        let ids: Vec<usize> = region.iter().map(|v| v.0).collect();
        println!(
            "generator {p}: ids={ids:?} ring={:?} area={:.3}",
            closed_ring(&out, PointId(p)).unwrap_or_default(),
            area(&ring)
        );
    }
}
