//! Strategy Comparison
//!
//! Two players with different risk limits race to the target score. Each
//! plays a full game on their own; whoever needed fewer turns wins. Player
//! one throws first, so a tie goes to player one.
//!
//! ## Outputs
//! - Head-to-head win ratio for one pair of limits
//! - Win-ratio surface over every pair of limits (heat map input)

use std::fmt;
use std::ops::Range;
use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::game::{play_pass_the_pigs, GameConfig};
use crate::outcome::PigSampler;

pub const COMPARISON_TRIALS: usize = 300;
pub const SURFACE_THRESHOLDS: Range<u32> = 0..100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn name(&self) -> &'static str {
        match self {
            Self::One => "Player 1",
            Self::Two => "Player 2",
        }
    }
}

/// Play one game per player and name the winner.
pub fn play_against_each_other<R: Rng + ?Sized>(
    sampler: &PigSampler,
    player_one: &GameConfig,
    player_two: &GameConfig,
    rng: &mut R,
) -> Player {
    let first = play_pass_the_pigs(sampler, player_one, rng);
    let second = play_pass_the_pigs(sampler, player_two, rng);
    if first.turns <= second.turns {
        Player::One
    } else {
        Player::Two
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub player_one_limit: u32,
    pub player_two_limit: u32,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
}

impl Comparison {
    pub fn trials(&self) -> usize {
        self.player_one_wins + self.player_two_wins
    }

    /// Share of trials won by player one.
    pub fn win_ratio(&self) -> f64 {
        self.player_one_wins as f64 / self.trials() as f64
    }

    pub fn winner(&self) -> Player {
        if self.player_one_wins >= self.player_two_wins {
            Player::One
        } else {
            Player::Two
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Trials:                  {}", self.trials())?;
        writeln!(
            f,
            "  Player 1 (limit {:>3}):    {} wins",
            self.player_one_limit, self.player_one_wins
        )?;
        writeln!(
            f,
            "  Player 2 (limit {:>3}):    {} wins",
            self.player_two_limit, self.player_two_wins
        )?;
        writeln!(f, "  Player 1 win ratio:      {:.1}%", self.win_ratio() * 100.0)?;
        write!(f, "  Leader:                  {}", self.winner().name())
    }
}

fn tally<R: Rng + ?Sized>(
    sampler: &PigSampler,
    player_one: &GameConfig,
    player_two: &GameConfig,
    trials: usize,
    rng: &mut R,
) -> Comparison {
    let player_one_wins = (0..trials)
        .filter(|_| play_against_each_other(sampler, player_one, player_two, &mut *rng) == Player::One)
        .count();
    Comparison {
        player_one_limit: player_one.limit,
        player_two_limit: player_two.limit,
        player_one_wins,
        player_two_wins: trials - player_one_wins,
    }
}

/// Head-to-head between two full game configurations.
pub fn compare_configs<R: Rng + ?Sized>(
    sampler: &PigSampler,
    player_one: &GameConfig,
    player_two: &GameConfig,
    trials: usize,
    rng: &mut R,
) -> Result<Comparison> {
    if trials == 0 {
        return Err(SimError::NoTrials);
    }
    let comparison = tally(sampler, player_one, player_two, trials, rng);
    debug!(
        player_one_limit = comparison.player_one_limit,
        player_two_limit = comparison.player_two_limit,
        ratio = comparison.win_ratio(),
        "comparison finished"
    );
    Ok(comparison)
}

/// Head-to-head between two risk limits under the default game rules.
pub fn run_strategy_comparison<R: Rng + ?Sized>(
    sampler: &PigSampler,
    player_one_limit: u32,
    player_two_limit: u32,
    trials: usize,
    rng: &mut R,
) -> Result<Comparison> {
    compare_configs(
        sampler,
        &GameConfig::with_limit(player_one_limit),
        &GameConfig::with_limit(player_two_limit),
        trials,
        rng,
    )
}

/// Player one's win ratio for every pair of thresholds.
///
/// `ratios[i][j]` is player one at `thresholds[i]` against player two at
/// `thresholds[j]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub thresholds: Vec<u32>,
    pub trials: usize,
    pub ratios: Vec<Vec<f64>>,
}

impl Surface {
    pub fn ratio(&self, player_one_limit: u32, player_two_limit: u32) -> Option<f64> {
        let row = self.thresholds.iter().position(|&t| t == player_one_limit)?;
        let col = self.thresholds.iter().position(|&t| t == player_two_limit)?;
        Some(self.ratios[row][col])
    }

    /// Player one threshold with the highest mean win ratio across all opponents.
    pub fn strongest_threshold(&self) -> Option<(u32, f64)> {
        self.thresholds
            .iter()
            .zip(&self.ratios)
            .map(|(&threshold, row)| (threshold, row.iter().sum::<f64>() / row.len() as f64))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5} |", "P1\\P2")?;
        for threshold in &self.thresholds {
            write!(f, " {:>5}", threshold)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(7 + 6 * self.thresholds.len()))?;
        for (threshold, row) in self.thresholds.iter().zip(&self.ratios) {
            write!(f, "{:>5} |", threshold)?;
            for ratio in row {
                write!(f, " {:>5.2}", ratio)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the win-ratio surface over `thresholds x thresholds`.
///
/// Cells run in parallel; cell `k` (row-major) draws from a generator
/// seeded with `seed + k`, so the result does not depend on scheduling.
pub fn comparison_surface(
    sampler: &PigSampler,
    thresholds: &[u32],
    trials: usize,
    seed: u64,
) -> Result<Surface> {
    if thresholds.is_empty() {
        return Err(SimError::NoThresholds);
    }
    if trials == 0 {
        return Err(SimError::NoTrials);
    }

    let start = Instant::now();
    let n = thresholds.len();
    info!(thresholds = n, trials, seed, "building comparison surface");

    let cells: Vec<f64> = (0..n * n)
        .into_par_iter()
        .map(|cell| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(cell as u64));
            let player_one = GameConfig::with_limit(thresholds[cell / n]);
            let player_two = GameConfig::with_limit(thresholds[cell % n]);
            tally(sampler, &player_one, &player_two, trials, &mut rng).win_ratio()
        })
        .collect();

    let ratios = cells.chunks(n).map(<[f64]>::to_vec).collect();
    info!(elapsed = ?start.elapsed(), "comparison surface finished");

    Ok(Surface {
        thresholds: thresholds.to_vec(),
        trials,
        ratios,
    })
}
