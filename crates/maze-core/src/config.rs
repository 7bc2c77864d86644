//! Agent configuration
//!
//! An agent is configured once per episode. All budget thresholds are
//! fractions of `max_turns`.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::consts::{
    FAR_EXIT_DISTANCE, SEARCH_EXPANSION_FACTOR, SEARCH_EXPANSION_FLOOR, TELEPORT_COOLDOWN,
    TIME_CRUNCH_FRACTION,
};
use crate::error::ConfigError;
use crate::grid::Direction;

/// Which half of the team an agent plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Role {
    /// Goal-focused: walks to every goal it hears about and leaves early
    /// when the exit is far away
    Collector,
    /// Exit-focused: teleports freely to widen coverage and closes in on
    /// the exit late in the episode
    Scout,
}

impl Role {
    /// Whether uncollected goals are exploration targets for this role
    pub const fn chases_goals(self) -> bool {
        matches!(self, Role::Collector)
    }
}

/// Budget and distance thresholds that shape the decision policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    /// Below this fraction of turns left, head for the exit regardless of goals
    pub time_crunch: f64,
    /// Leave as soon as the known exit is farther than this
    pub far_exit_distance: Option<u32>,
    /// Below this fraction of turns left, walk toward the exit without using it yet
    pub late_pursuit: Option<f64>,
    /// Teleports are allowed below this fraction of turns left...
    pub teleport_budget: f64,
    /// ...or while the frontier is smaller than this
    pub teleport_frontier: usize,
    /// Move emitted when nothing else is possible
    pub fallback: Direction,
}

impl PolicyThresholds {
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Collector => Self {
                time_crunch: TIME_CRUNCH_FRACTION,
                far_exit_distance: Some(FAR_EXIT_DISTANCE),
                late_pursuit: None,
                teleport_budget: 0.6,
                teleport_frontier: 5,
                fallback: Direction::North,
            },
            Role::Scout => Self {
                time_crunch: TIME_CRUNCH_FRACTION,
                far_exit_distance: None,
                late_pursuit: Some(0.3),
                teleport_budget: 0.7,
                teleport_frontier: 20,
                fallback: Direction::East,
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("time_crunch", self.time_crunch)?;
        check_fraction("teleport_budget", self.teleport_budget)?;
        if let Some(late) = self.late_pursuit {
            check_fraction("late_pursuit", late)?;
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

/// How the search treats cells the agent has never seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SearchMode {
    /// Unknown cells are passable; only walls already seen block
    #[default]
    Optimistic,
    /// Only visited, frontier and target cells are passable
    KnownCells,
}

/// Node-expansion cap for one search: `floor + factor * known cells`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub floor: usize,
    pub factor: usize,
}

impl SearchLimits {
    pub fn budget_for(&self, known_cells: usize) -> usize {
        self.floor
            .saturating_add(self.factor.saturating_mul(known_cells))
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            floor: SEARCH_EXPANSION_FLOOR,
            factor: SEARCH_EXPANSION_FACTOR,
        }
    }
}

/// Configuration for creating an [`Agent`](crate::Agent).
///
/// ```
/// use maze_core::{AgentConfig, Role, SearchMode};
///
/// let config = AgentConfig::new(Role::Scout, 200)
///     .with_seed(7)
///     .with_search_mode(SearchMode::KnownCells);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub role: Role,
    /// Turn budget for the episode
    pub max_turns: u32,
    /// Seed for fallback moves; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Overrides the role's default thresholds
    #[serde(default)]
    pub thresholds: Option<PolicyThresholds>,
    #[serde(default = "default_cooldown")]
    pub teleport_cooldown: u32,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default)]
    pub search_limits: SearchLimits,
}

fn default_cooldown() -> u32 {
    TELEPORT_COOLDOWN
}

impl AgentConfig {
    pub fn new(role: Role, max_turns: u32) -> Self {
        Self {
            role,
            max_turns,
            seed: None,
            thresholds: None,
            teleport_cooldown: TELEPORT_COOLDOWN,
            search_mode: SearchMode::default(),
            search_limits: SearchLimits::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_thresholds(mut self, thresholds: PolicyThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_teleport_cooldown(mut self, cooldown: u32) -> Self {
        self.teleport_cooldown = cooldown;
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.search_limits = limits;
        self
    }

    /// Effective thresholds: the override if set, else the role defaults
    pub fn thresholds(&self) -> PolicyThresholds {
        self.thresholds
            .unwrap_or_else(|| PolicyThresholds::for_role(self.role))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroTurnBudget);
        }
        if self.search_limits.floor == 0 {
            return Err(ConfigError::ZeroSearchFloor);
        }
        self.thresholds().validate()
    }
}
