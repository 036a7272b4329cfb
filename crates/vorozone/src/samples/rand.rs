//! Seeded random wheel diagrams (replay tokens).
//!
//! Model
//! - Draw a spoke count, a ring radius, a hub position, and optionally a global
//!   phase; build the closed-form `wheel` diagram from them.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG, so
//!   any sample can be regenerated from its token alone.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::wheel;
use crate::diagram::VoronoiDiagram;

/// Spoke count distribution.
#[derive(Clone, Copy, Debug)]
pub enum SpokeCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl SpokeCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            SpokeCount::Fixed(n) => n.max(3),
            SpokeCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Random wheel configuration.
#[derive(Clone, Copy, Debug)]
pub struct WheelCfg {
    pub spokes: SpokeCount,
    /// Ring radius drawn uniformly from `[ring_min, ring_max]`.
    pub ring_min: f64,
    pub ring_max: f64,
    /// Hub coordinates drawn uniformly from `[-hub_spread, hub_spread]²`.
    pub hub_spread: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for WheelCfg {
    fn default() -> Self {
        Self {
            spokes: SpokeCount::Uniform { min: 3, max: 24 },
            ring_min: 0.5,
            ring_max: 5.0,
            hub_spread: 10.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Drawn wheel plus the parameters that produced it.
#[derive(Clone, Debug)]
pub struct WheelSample {
    pub diagram: VoronoiDiagram,
    pub spokes: usize,
    pub ring_radius: f64,
    pub hub: Vector2<f64>,
    pub phase: f64,
    pub token: ReplayToken,
}

/// Draw a random wheel diagram.
pub fn draw_wheel(cfg: WheelCfg, tok: ReplayToken) -> WheelSample {
    let mut rng = tok.to_std_rng();
    let spokes = cfg.spokes.sample(&mut rng);
    let lo = cfg.ring_min.max(1e-9);
    let hi = cfg.ring_max.max(lo);
    let ring_radius = lo + (hi - lo) * rng.gen::<f64>();
    let s = cfg.hub_spread.abs();
    let hub = Vector2::new(
        (rng.gen::<f64>() * 2.0 - 1.0) * s,
        (rng.gen::<f64>() * 2.0 - 1.0) * s,
    );
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    WheelSample {
        diagram: wheel(spokes, ring_radius, hub, phase),
        spokes,
        ring_radius,
        hub,
        phase,
        token: tok,
    }
}
