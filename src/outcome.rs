//! Pig Outcomes and Sampling
//!
//! A thrown pig lands in one of six positions. Each position carries a
//! probability weight and two point values: one used when the two pigs land
//! differently, one used when both pigs land the same way.
//!
//! ## Sampling Modes
//! - Cumulative: walk the weight table with a running sum against a single
//!   uniform draw (the published weights are used as-is, unnormalized)
//! - Normalized: draw proportionally to `weight / total` via an alias table
//!
//! The cumulative walk tolerates tables that sum to less than 1.0: a pass
//! that ends without a selection is followed by another pass with the same
//! draw and the running sum carried over. The whole passes that cannot
//! land are skipped arithmetically, so a sample costs one pass however
//! small the total weight is.

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, WeightedAliasIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimError};

pub const OUTCOME_COUNT: usize = 6;

/// Published landing weights, in `Outcome::ALL` order.
///
/// These do not sum to 1.0. The Trot entry in particular is far above its
/// physical frequency; it is kept verbatim so that simulated frequencies
/// match the reference numbers.
pub const PIG_PROBABILITIES: [f64; OUTCOME_COUNT] = [0.3020, 0.3490, 0.880, 0.2240, 0.03, 0.0061];

/// Points for a single pig when the pair does not match.
pub const PIG_POINTS: [u32; OUTCOME_COUNT] = [0, 0, 5, 5, 10, 15];

/// Points for a matching pair.
pub const DOUBLE_PIG_POINTS: [u32; OUTCOME_COUNT] = [1, 1, 20, 20, 40, 60];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Dot,
    NoDot,
    Trot,
    Razorback,
    Snouter,
    Jowler,
}

impl Outcome {
    /// Fixed walk order for the cumulative sampler.
    pub const ALL: [Outcome; OUTCOME_COUNT] = [
        Self::Dot,
        Self::NoDot,
        Self::Trot,
        Self::Razorback,
        Self::Snouter,
        Self::Jowler,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::NoDot => "no_dot",
            Self::Trot => "trot",
            Self::Razorback => "razorback",
            Self::Snouter => "snouter",
            Self::Jowler => "jowler",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn points(self) -> u32 {
        PIG_POINTS[self.index()]
    }

    pub const fn double_points(self) -> u32 {
        DOUBLE_PIG_POINTS[self.index()]
    }

    /// Whether this is one of the two side positions that bust when split.
    pub const fn is_side(self) -> bool {
        matches!(self, Self::Dot | Self::NoDot)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated landing weights, indexed by `Outcome`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; OUTCOME_COUNT]", into = "[f64; OUTCOME_COUNT]")]
pub struct PigWeights([f64; OUTCOME_COUNT]);

impl PigWeights {
    /// Every weight must be finite and non-negative, and at least one positive.
    pub fn new(weights: [f64; OUTCOME_COUNT]) -> Result<Self> {
        for outcome in Outcome::ALL {
            let weight = weights[outcome.index()];
            if !weight.is_finite() || weight < 0.0 {
                return Err(SimError::InvalidWeights { outcome, weight });
            }
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(SimError::ZeroTotalWeight);
        }
        Ok(Self(weights))
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.0[outcome.index()]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> [f64; OUTCOME_COUNT] {
        self.0
    }
}

impl Default for PigWeights {
    fn default() -> Self {
        Self(PIG_PROBABILITIES)
    }
}

impl TryFrom<[f64; OUTCOME_COUNT]> for PigWeights {
    type Error = SimError;

    fn try_from(weights: [f64; OUTCOME_COUNT]) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<PigWeights> for [f64; OUTCOME_COUNT] {
    fn from(weights: PigWeights) -> Self {
        weights.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    #[default]
    Cumulative,
    Normalized,
}

impl SamplingMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cumulative => "Cumulative (published weights)",
            Self::Normalized => "Normalized",
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Walk the weight table against one uniform draw.
///
/// The running sum carries over between passes. After `k` whole passes it
/// equals `k * total`, so the landing pass is `floor(r / total)` and only
/// the draw's position inside that pass matters. Zero-weight outcomes are
/// never returned.
pub fn sample_pig<R: Rng + ?Sized>(weights: &PigWeights, rng: &mut R) -> Outcome {
    let r: f64 = rng.gen();
    let total = weights.total();
    let position = (r / total).fract() * total;

    let mut sum = 0.0;
    let mut last = Outcome::Dot;
    for outcome in Outcome::ALL {
        let weight = weights.get(outcome);
        if weight <= 0.0 {
            continue;
        }
        sum += weight;
        last = outcome;
        if sum >= position {
            return outcome;
        }
    }
    // Rounding can leave the position a hair past the final running sum.
    last
}

#[derive(Clone, Debug)]
enum Draw {
    Cumulative,
    Normalized(WeightedAliasIndex<f64>),
}

/// Weight table plus sampling mode, built once and shared by every roll.
#[derive(Clone, Debug)]
pub struct PigSampler {
    weights: PigWeights,
    mode: SamplingMode,
    draw: Draw,
}

impl PigSampler {
    pub fn new(weights: PigWeights, mode: SamplingMode) -> Result<Self> {
        let draw = match mode {
            SamplingMode::Cumulative => Draw::Cumulative,
            SamplingMode::Normalized => {
                let alias = WeightedAliasIndex::new(weights.as_array().to_vec())
                    .map_err(|_| SimError::ZeroTotalWeight)?;
                Draw::Normalized(alias)
            }
        };
        debug!(%mode, total = weights.total(), "pig sampler built");
        Ok(Self {
            weights,
            mode,
            draw,
        })
    }

    pub fn weights(&self) -> &PigWeights {
        &self.weights
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        match &self.draw {
            Draw::Cumulative => sample_pig(&self.weights, rng),
            Draw::Normalized(alias) => Outcome::ALL[alias.sample(rng)],
        }
    }

    /// Exact per-outcome probability under this sampler.
    ///
    /// For the cumulative walk an outcome owns every interval
    /// `(k * total + before, k * total + before + weight]` that overlaps
    /// `[0, 1)`, where `before` is the weight of the outcomes ahead of it.
    /// The `floor(1 / total)` passes that fit entirely below 1.0 each give
    /// the outcome its full weight; the last partial pass is clipped.
    pub fn effective_probabilities(&self) -> [f64; OUTCOME_COUNT] {
        let total = self.weights.total();
        let mut probabilities = [0.0; OUTCOME_COUNT];
        match self.mode {
            SamplingMode::Normalized => {
                for outcome in Outcome::ALL {
                    probabilities[outcome.index()] = self.weights.get(outcome) / total;
                }
            }
            SamplingMode::Cumulative => {
                let full_passes = (1.0 / total).floor();
                let remainder = (1.0 - full_passes * total).max(0.0);
                let mut before = 0.0;
                for outcome in Outcome::ALL {
                    let weight = self.weights.get(outcome);
                    let after = before + weight;
                    let partial = after.min(remainder) - before.min(remainder);
                    probabilities[outcome.index()] = full_passes * weight + partial;
                    before = after;
                }
            }
        }
        probabilities
    }
}

impl Default for PigSampler {
    fn default() -> Self {
        Self {
            weights: PigWeights::default(),
            mode: SamplingMode::Cumulative,
            draw: Draw::Cumulative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_point_tables() {
        assert_eq!(Outcome::Trot.points(), 5);
        assert_eq!(Outcome::Trot.double_points(), 20);
        assert_eq!(Outcome::Jowler.points(), 15);
        assert_eq!(Outcome::Jowler.double_points(), 60);
        assert_eq!(Outcome::Dot.double_points(), 1);
        assert!(Outcome::NoDot.is_side());
        assert!(!Outcome::Snouter.is_side());
    }

    #[test]
    fn test_rejects_bad_weights() {
        let err = PigWeights::new([0.1, -0.2, 0.1, 0.1, 0.1, 0.1]).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidWeights {
                outcome: Outcome::NoDot,
                weight: -0.2
            }
        );
        assert!(PigWeights::new([0.1, f64::NAN, 0.1, 0.1, 0.1, 0.1]).is_err());
        assert_eq!(PigWeights::new([0.0; 6]), Err(SimError::ZeroTotalWeight));
    }

    #[test]
    fn test_underweighted_table_retries() {
        let weights = PigWeights::new([0.01, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(sample_pig(&weights, &mut rng), Outcome::Dot);
        }
    }

    #[test]
    fn test_tiny_total_weight_still_lands() {
        let weights = PigWeights::new([1e-20, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(sample_pig(&weights, &mut rng), Outcome::Dot);
        }

        let sampler = PigSampler::new(weights, SamplingMode::Cumulative).unwrap();
        let probs = sampler.effective_probabilities();
        assert!((probs[0] - 1.0).abs() < 1e-9);
        assert_eq!(&probs[1..], &[0.0; 5]);
    }

    #[test]
    fn test_tiny_mixed_table_never_picks_zero_weight() {
        let weights = PigWeights::new([0.0, 3e-12, 0.0, 1e-12, 0.0, 0.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let mut seen = [0usize; OUTCOME_COUNT];
        for _ in 0..4000 {
            seen[sample_pig(&weights, &mut rng).index()] += 1;
        }
        assert_eq!(seen[0] + seen[2] + seen[4] + seen[5], 0);
        assert!(seen[1] > seen[3]);
        assert!(seen[3] > 0);

        let sampler = PigSampler::new(weights, SamplingMode::Cumulative).unwrap();
        let probs = sampler.effective_probabilities();
        assert!((probs[1] - 0.75).abs() < 1e-3);
        assert!((probs[3] - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_sampling_mode_display() {
        assert_eq!(SamplingMode::Normalized.to_string(), "Normalized");
        assert_eq!(
            SamplingMode::default().to_string(),
            "Cumulative (published weights)"
        );
    }

    #[test]
    fn test_default_cumulative_probabilities() {
        let probs = PigSampler::default().effective_probabilities();
        assert!((probs[0] - 0.302).abs() < 1e-12);
        assert!((probs[1] - 0.349).abs() < 1e-12);
        assert!((probs[2] - 0.349).abs() < 1e-12);
        assert_eq!(&probs[3..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_underweighted_probabilities_sum_to_one() {
        let weights = PigWeights::new([0.30, 0.30, 0.08, 0.20, 0.03, 0.006]).unwrap();
        let sampler = PigSampler::new(weights, SamplingMode::Cumulative).unwrap();
        let probs = sampler.effective_probabilities();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        // The retry pass hands the leftover mass back to the head of the table.
        assert!(probs[0] > 0.30);
    }

    #[test]
    fn test_normalized_frequencies() {
        let sampler = PigSampler::new(PigWeights::default(), SamplingMode::Normalized).unwrap();
        let expected = sampler.effective_probabilities();
        let mut counts = [0usize; OUTCOME_COUNT];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 200_000;
        for _ in 0..draws {
            counts[sampler.sample(&mut rng).index()] += 1;
        }
        for outcome in Outcome::ALL {
            let observed = counts[outcome.index()] as f64 / draws as f64;
            assert!(
                (observed - expected[outcome.index()]).abs() < 0.01,
                "{outcome}: observed {observed}, expected {}",
                expected[outcome.index()]
            );
        }
        assert!(counts[Outcome::Jowler.index()] > 0);
    }

    #[test]
    fn test_weights_serde() {
        let weights = PigWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let back: PigWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, back);

        let rejected = serde_json::from_str::<PigWeights>("[0,0,0,0,0,0]");
        assert!(rejected.is_err());
    }
}
