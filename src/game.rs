//! Game Player
//!
//! Plays rounds until the banked score reaches the target. Busted rounds
//! bank nothing but still cost a turn, so the turn count is the measure of
//! how good a risk limit is.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::outcome::PigSampler;
use crate::round::play_round;

pub const TARGET_SCORE: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 17;
pub const MAX_TARGET_SCORE: u32 = 1_000_000;

/// Rules for one player's game.
///
/// `GameConfig::new` and deserialization require `1 <= target_score <=
/// MAX_TARGET_SCORE` and `limit <= target_score`, which keeps every game
/// finite. `with_limit` accepts any limit because clamping is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    pub limit: u32,          // Keep throwing while the round score is at or below this
    pub target_score: u32,   // Game ends once the banked score reaches this
    pub clamp_to_goal: bool, // Never risk more than the points still needed
}

impl GameConfig {
    pub fn new(limit: u32, target_score: u32, clamp_to_goal: bool) -> Result<Self> {
        if target_score == 0 || target_score > MAX_TARGET_SCORE {
            return Err(SimError::InvalidTarget {
                target: target_score,
                max: MAX_TARGET_SCORE,
            });
        }
        if limit > target_score {
            return Err(SimError::LimitAboveTarget {
                limit,
                target: target_score,
            });
        }
        Ok(Self {
            limit,
            target_score,
            clamp_to_goal,
        })
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            target_score: TARGET_SCORE,
            clamp_to_goal: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawGameConfig {
    limit: u32,
    target_score: u32,
    clamp_to_goal: bool,
}

impl Default for RawGameConfig {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            limit: config.limit,
            target_score: config.target_score,
            clamp_to_goal: config.clamp_to_goal,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = SimError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.limit, raw.target_score, raw.clamp_to_goal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub turns: u32,
    pub busts: u32,
}

pub fn play_pass_the_pigs<R: Rng + ?Sized>(
    sampler: &PigSampler,
    config: &GameConfig,
    rng: &mut R,
) -> GameResult {
    let mut limit = config.limit;
    let mut total_score = 0;
    let mut turns = 0;
    let mut busts = 0;

    while total_score < config.target_score {
        let remaining = config.target_score - total_score;
        if config.clamp_to_goal && remaining < limit {
            limit = remaining;
        }

        let round = play_round(sampler, limit, rng);
        match round.score() {
            Some(score) => total_score += score,
            None => busts += 1,
        }
        turns += 1;
    }

    debug!(
        limit = config.limit,
        score = total_score,
        turns,
        busts,
        "game finished"
    );

    GameResult {
        score: total_score,
        turns,
        busts,
    }
}
