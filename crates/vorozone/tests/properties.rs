//! Property tests over random wheel diagrams.

use proptest::prelude::*;
use vorozone::api::{
    draw_wheel, is_simple, reconstruct, ReconstructCfg, ReplayToken, SpokeCount, WheelCfg,
};
use vorozone::diagram::PointId;

fn cfg(max_spokes: usize) -> WheelCfg {
    WheelCfg {
        spokes: SpokeCount::Uniform {
            min: 3,
            max: max_spokes,
        },
        ..WheelCfg::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_cell_is_a_simple_polygon(seed in any::<u64>(), index in 0u64..1000, radius in 1.0f64..1e4) {
        let w = draw_wheel(cfg(32), ReplayToken { seed, index });
        let out = reconstruct(&w.diagram, ReconstructCfg::with_radius(radius)).unwrap();
        prop_assert_eq!(out.regions.len(), w.spokes + 1);
        for p in 0..=w.spokes {
            let ring = out.polygon(PointId(p)).unwrap();
            prop_assert!(is_simple(&ring), "generator {} of {:?}", p, w.token);
        }
    }

    #[test]
    fn vertex_list_is_append_only(seed in any::<u64>(), index in 0u64..1000) {
        let w = draw_wheel(cfg(16), ReplayToken { seed, index });
        let original = w.diagram.vertices.to_planar().unwrap();
        let out = reconstruct(&w.diagram, ReconstructCfg::default()).unwrap();
        prop_assert_eq!(&out.vertices[..original.len()], original.as_slice());
        prop_assert_eq!(out.far_points().len(), 2 * w.spokes);
        // hub cell is finite and passes through verbatim
        prop_assert_eq!(out.regions[0].len(), w.spokes);
    }

    #[test]
    fn far_point_scales_linearly_with_radius(seed in any::<u64>(), r1 in 1.0f64..10.0, k in 2.0f64..20.0) {
        let w = draw_wheel(cfg(12), ReplayToken { seed, index: 0 });
        let a = reconstruct(&w.diagram, ReconstructCfg::with_radius(r1)).unwrap();
        let b = reconstruct(&w.diagram, ReconstructCfg::with_radius(r1 * k)).unwrap();
        // same members per cell; the angular start may rotate as far points move
        for (ra, rb) in a.regions.iter().zip(&b.regions) {
            let (mut sa, mut sb) = (ra.clone(), rb.clone());
            sa.sort();
            sb.sort();
            prop_assert_eq!(sa, sb);
        }
        let n0 = a.original_vertex_count;
        for i in n0..a.vertices.len() {
            let step = (b.vertices[i] - a.vertices[i]).norm();
            prop_assert!((step - r1 * (k - 1.0)).abs() < 1e-6 * r1 * k);
        }
    }
}
