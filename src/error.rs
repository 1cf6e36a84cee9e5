//! Error types for the simulator.

use thiserror::Error;

use crate::outcome::Outcome;

/// Errors raised while configuring or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid weight for {outcome}: {weight} (must be finite and non-negative)")]
    InvalidWeights { outcome: Outcome, weight: f64 },
    #[error("weight table sums to zero")]
    ZeroTotalWeight,
    #[error("at least one trial is required")]
    NoTrials,
    #[error("threshold range is empty")]
    NoThresholds,
    #[error("target score {target} out of range (1..={max})")]
    InvalidTarget { target: u32, max: u32 },
    #[error("risk limit {limit} is above the target score {target}")]
    LimitAboveTarget { limit: u32, target: u32 },
}

pub type Result<T> = std::result::Result<T, SimError>;
