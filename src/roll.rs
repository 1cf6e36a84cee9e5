//! Pair Roll Evaluation
//!
//! Scores one throw of both pigs against a running round score.
//!
//! ## Rules (first match wins)
//! 1. Matching pair: add the double value
//! 2. Dot with No Dot (either order): bust, round score is lost
//! 3. Anything else: add both single values

use rand::Rng;
use tracing::trace;

use crate::outcome::{Outcome, PigSampler};

/// Both pigs from one throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PigPair(pub Outcome, pub Outcome);

impl PigPair {
    pub fn throw<R: Rng + ?Sized>(sampler: &PigSampler, rng: &mut R) -> Self {
        let first = sampler.sample(rng);
        let second = sampler.sample(rng);
        Self(first, second)
    }

    pub fn is_bust(&self) -> bool {
        self.0 != self.1 && self.0.is_side() && self.1.is_side()
    }

    /// Points this throw is worth, or `None` on a bust.
    pub fn points(&self) -> Option<u32> {
        if self.0 == self.1 {
            Some(self.0.double_points())
        } else if self.is_bust() {
            None
        } else {
            Some(self.0.points() + self.1.points())
        }
    }
}

/// Apply the scoring rules for `(a, b)` to `current`.
pub fn score_pair(a: Outcome, b: Outcome, current: u32) -> Option<u32> {
    PigPair(a, b).points().map(|points| current + points)
}

/// Throw both pigs and return the updated round score, or `None` on a bust.
pub fn roll_the_pigs<R: Rng + ?Sized>(
    sampler: &PigSampler,
    current_round_score: u32,
    rng: &mut R,
) -> Option<u32> {
    let PigPair(first, second) = PigPair::throw(sampler, rng);
    let next = score_pair(first, second, current_round_score);
    trace!(%first, %second, ?next, "rolled");
    next
}
