//! Error types for the decision core
//!
//! The per-turn path never fails; these only surface at the boundaries:
//! decoding host percepts and validating an agent configuration.

use thiserror::Error;

use crate::grid::Compass;

/// Host percepts could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerceptError {
    #[error("unknown percept key '{key}'")]
    UnknownKey { key: String },

    #[error("percept for {slot} is missing")]
    MissingSlot { slot: Compass },

    #[error("percept for {slot} is empty")]
    EmptyCode { slot: Compass },
}

/// Agent configuration is unusable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_turns must be positive")]
    ZeroTurnBudget,

    #[error("threshold '{name}' must lie in [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("search expansion floor must be positive")]
    ZeroSearchFloor,
}

/// Umbrella error for building and feeding an agent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error(transparent)]
    Percept(#[from] PerceptError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
