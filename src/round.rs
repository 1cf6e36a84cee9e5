//! Round Player
//!
//! Keeps throwing while the round score is at or below the risk limit.
//! A round is `Accumulating` until it either busts or passes the limit,
//! both of which end it.

use rand::Rng;
use tracing::trace;

use crate::outcome::PigSampler;
use crate::roll::roll_the_pigs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Split sides came up; everything accumulated this round is lost.
    Busted { rolls: u32 },
    /// Round score went past the limit and was banked.
    LimitReached { score: u32, rolls: u32 },
}

impl RoundOutcome {
    pub fn score(&self) -> Option<u32> {
        match self {
            Self::Busted { .. } => None,
            Self::LimitReached { score, .. } => Some(*score),
        }
    }

    pub fn rolls(&self) -> u32 {
        match self {
            Self::Busted { rolls } | Self::LimitReached { rolls, .. } => *rolls,
        }
    }

    pub fn is_bust(&self) -> bool {
        matches!(self, Self::Busted { .. })
    }
}

pub fn play_round<R: Rng + ?Sized>(sampler: &PigSampler, limit: u32, rng: &mut R) -> RoundOutcome {
    let mut current_round_score = 0;
    let mut rolls = 0;
    while current_round_score <= limit {
        rolls += 1;
        match roll_the_pigs(sampler, current_round_score, rng) {
            Some(score) => current_round_score = score,
            None => {
                trace!(limit, rolls, lost = current_round_score, "round busted");
                return RoundOutcome::Busted { rolls };
            }
        }
    }
    trace!(limit, rolls, score = current_round_score, "round banked");
    RoundOutcome::LimitReached {
        score: current_round_score,
        rolls,
    }
}

/// Play one round, returning the banked score or `None` on a bust.
pub fn play_a_round<R: Rng + ?Sized>(sampler: &PigSampler, limit: u32, rng: &mut R) -> Option<u32> {
    play_round(sampler, limit, rng).score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_limit_single_roll() {
        let sampler = PigSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let outcome = play_round(&sampler, 0, &mut rng);
            assert_eq!(outcome.rolls(), 1);
            if let Some(score) = outcome.score() {
                assert!(score > 0);
            }
        }
    }

    #[test]
    fn test_banked_score_exceeds_limit() {
        let sampler = PigSampler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for limit in [0, 5, 17, 40] {
            for _ in 0..200 {
                if let RoundOutcome::LimitReached { score, .. } = play_round(&sampler, limit, &mut rng) {
                    assert!(score > limit);
                }
            }
        }
    }

    #[test]
    fn test_seeded_rounds_repeat() {
        let sampler = PigSampler::default();
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(
                play_round(&sampler, 17, &mut rng1),
                play_round(&sampler, 17, &mut rng2)
            );
        }
    }
}
