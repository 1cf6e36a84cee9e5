//! Pass the Pigs Simulation Library
//!
//! Monte Carlo tools for the dice game "Pass the Pigs": how many turns a
//! risk limit needs to reach 100 points, and how two limits fare against
//! each other.
//!
//! ## Modules
//!
//! - `outcome`: landing positions, point tables and the weighted sampler
//! - `roll`: scoring one throw of both pigs
//! - `round`: throwing until bust or past the risk limit
//! - `game`: playing rounds up to the target score
//! - `strategy`: head-to-head win ratios and the comparison surface
//! - `sweep`: turn-count distributions per risk limit
//!
//! ## Usage
//!
//! ```
//! use pigs_simulation::game::{play_pass_the_pigs, GameConfig};
//! use pigs_simulation::outcome::PigSampler;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let sampler = PigSampler::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let result = play_pass_the_pigs(&sampler, &GameConfig::with_limit(17), &mut rng);
//! assert!(result.score >= 100);
//! ```

pub mod error;
pub mod game;
pub mod outcome;
pub mod roll;
pub mod round;
pub mod strategy;
pub mod sweep;

pub use error::{Result, SimError};
pub use game::{play_pass_the_pigs, GameConfig, GameResult};
pub use outcome::{Outcome, PigSampler, PigWeights, SamplingMode};
pub use round::{play_a_round, RoundOutcome};
pub use strategy::{comparison_surface, run_strategy_comparison, Comparison, Surface};
pub use sweep::{run_threshold_simulation, BoxStats, ThresholdSweep};
