//! Random point clouds in 2D (uniform box, uniform disk, radial jitter) with replay tokens.
//!
//! Purpose
//! - Deterministic, indexable samplers for the CLI `generate` command, tests and
//!   benches. The same `(cfg, token)` pair always yields the same point set.
//!
//! Model
//! - `Box`/`Disk`: i.i.d. uniform samples.
//! - `Radial`: `count` equally spaced angles with bounded angular and radial
//!   jitter; produces near-convex-position clouds that stress hull merges.
//!
//! Code cross-refs: `util::preprocess_points` (run it before building a tree).

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Point;

/// Sampling region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CloudShape {
    /// Uniform in `[-half_width, half_width]²`.
    Box { half_width: f64 },
    /// Uniform in the disk of the given radius.
    Disk { radius: f64 },
    /// Jittered points around a circle; `radial_jitter` is relative to `radius`.
    Radial {
        radius: f64,
        angle_jitter_frac: f64,
        radial_jitter: f64,
    },
}

/// Point-cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    pub count: usize,
    pub shape: CloudShape,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: 64,
            shape: CloudShape::Box { half_width: 100.0 },
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
        // SplitMix64-style mixing, cheap and stable.
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

/// Draw `cfg.count` points. Not preprocessed: duplicates in x are possible in principle.
pub fn draw_points(cfg: CloudCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    match cfg.shape {
        CloudShape::Box { half_width } => {
            let h = half_width.abs().max(1e-9);
            (0..cfg.count)
                .map(|_| Point::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h)))
                .collect()
        }
        CloudShape::Disk { radius } => {
            let r0 = radius.abs().max(1e-9);
            (0..cfg.count)
                .map(|_| {
                    // sqrt for area-uniform radii
                    let r = r0 * rng.gen::<f64>().sqrt();
                    let th = rng.gen::<f64>() * TAU;
                    Point::new(r * th.cos(), r * th.sin())
                })
                .collect()
        }
        CloudShape::Radial {
            radius,
            angle_jitter_frac,
            radial_jitter,
        } => {
            let n = cfg.count.max(1);
            let aj = angle_jitter_frac.clamp(0.0, 0.49);
            let rj = radial_jitter.max(0.0);
            let r0 = radius.abs().max(1e-9);
            let delta = TAU / (n as f64);
            let phase = rng.gen::<f64>() * TAU;
            (0..cfg.count)
                .map(|k| {
                    let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
                    let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
                    let r = (1.0 + u).max(1e-6) * r0;
                    Point::new(th.cos() * r, th.sin() * r)
                })
                .collect()
        }
    }
}
