//! Threshold Sweep
//!
//! Plays many solo games at each risk limit and records how many turns each
//! game took. The per-threshold turn lists are what a box plot consumes;
//! `BoxStats` gives the same five-number summary without drawing anything.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use crate::error::{Result, SimError};
use crate::game::{play_pass_the_pigs, GameConfig, GameResult};
use crate::outcome::PigSampler;

/// Games per threshold in a full sweep.
pub const SWEEP_GAMES: usize = 999;
pub const SWEEP_THRESHOLDS: RangeInclusive<u32> = 0..=100;

/// Play `games` independent games in parallel; game `i` is seeded with `seed + i`.
pub fn simulate_games(
    sampler: &PigSampler,
    config: &GameConfig,
    games: usize,
    seed: u64,
) -> Vec<GameResult> {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            play_pass_the_pigs(sampler, config, &mut rng)
        })
        .collect()
}

/// Linear-interpolated percentile of an ascending slice.
fn percentile(sorted: &[u32], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub min: u32,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: u32,
    pub mean: f64,
}

impl BoxStats {
    pub fn from_samples(samples: &[u32]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let sum: u64 = sorted.iter().map(|&s| s as u64).sum();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            mean: sum as f64 / sorted.len() as f64,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

impl fmt::Display for BoxStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} min={} q1={:.1} median={:.1} q3={:.1} max={} mean={:.2}",
            self.count, self.min, self.q1, self.median, self.q3, self.max, self.mean
        )
    }
}

/// Turn counts per threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdSweep {
    pub games: usize,
    pub turns: BTreeMap<u32, Vec<u32>>,
}

impl ThresholdSweep {
    pub fn stats(&self, threshold: u32) -> Option<BoxStats> {
        self.turns
            .get(&threshold)
            .and_then(|turns| BoxStats::from_samples(turns))
    }

    pub fn summaries(&self) -> Vec<(u32, BoxStats)> {
        self.turns
            .iter()
            .filter_map(|(&threshold, turns)| Some((threshold, BoxStats::from_samples(turns)?)))
            .collect()
    }

    /// Threshold with the lowest mean turn count. Ties go to the lower threshold.
    pub fn best(&self) -> Option<(u32, BoxStats)> {
        self.summaries()
            .into_iter()
            .min_by(|a, b| a.1.mean.total_cmp(&b.1.mean))
    }
}

/// Play `games` games at every threshold and collect turn counts.
///
/// Thresholds are deduplicated and visited in ascending order, so
/// `[10, 10, 20]` runs the same games as `[20, 10]`.
pub fn run_threshold_simulation(
    sampler: &PigSampler,
    thresholds: &[u32],
    games: usize,
    seed: u64,
) -> Result<ThresholdSweep> {
    if thresholds.is_empty() {
        return Err(SimError::NoThresholds);
    }
    if games == 0 {
        return Err(SimError::NoTrials);
    }

    let unique: BTreeSet<u32> = thresholds.iter().copied().collect();
    let start = Instant::now();
    info!(thresholds = unique.len(), games, seed, "running threshold sweep");

    let mut turns = BTreeMap::new();
    for (i, threshold) in unique.into_iter().enumerate() {
        let offset = seed.wrapping_add((i * games) as u64);
        let results = simulate_games(sampler, &GameConfig::with_limit(threshold), games, offset);
        turns.insert(threshold, results.iter().map(|r| r.turns).collect());
    }

    info!(elapsed = ?start.elapsed(), "threshold sweep finished");
    Ok(ThresholdSweep { games, turns })
}
