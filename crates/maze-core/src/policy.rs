//! Decision policy
//!
//! Picks exactly one action per turn. Nothing persists between turns except
//! what is stored in [`AgentState`]; the decision is re-derived from scratch
//! every time, checking in order:
//!
//! 1. standing on an uncollected goal: collect it
//! 2. standing on the exit and ready to leave: use it
//! 3. standing on a teleport the [`TeleportGate`] allows: use it
//! 4. otherwise move, toward the exit when it is time to leave, else toward
//!    the nearest frontier cell
//! 5. if no usable step came out of the search, move randomly, preferring
//!    cells not visited in the last few moves

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::{AgentConfig, PolicyThresholds, Role, SearchLimits, SearchMode};
use crate::grid::{Direction, Position};
use crate::percept::{CellCategory, Percepts};
use crate::rng::AgentRng;
use crate::search::FrontierSearch;
use crate::state::AgentState;
use crate::teleport::TeleportGate;

/// Action sent back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    /// Use whatever is on the current cell: goal, teleport or exit
    Activate,
}

impl Action {
    /// Host action code: `N`, `E`, `S`, `W` or `U`
    pub const fn code(self) -> char {
        match self {
            Action::Move(dir) => dir.code(),
            Action::Activate => 'U',
        }
    }

    pub const fn from_code(c: char) -> Option<Self> {
        match c {
            'U' => Some(Action::Activate),
            _ => match Direction::from_code(c) {
                Some(dir) => Some(Action::Move(dir)),
                None => None,
            },
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::Move(dir) => write!(f, "move {dir}"),
            Action::Activate => write!(f, "activate"),
        }
    }
}

/// Which branch of the policy produced the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Decision {
    CollectGoal,
    UseExit,
    UseTeleport,
    Explore,
    PursueExit,
    RandomFallback,
}

/// Role-specific policy built from an [`AgentConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    pub role: Role,
    pub thresholds: PolicyThresholds,
    pub gate: TeleportGate,
    pub search_mode: SearchMode,
    pub search_limits: SearchLimits,
}

impl Policy {
    pub fn from_config(config: &AgentConfig) -> Self {
        let thresholds = config.thresholds();
        Self {
            role: config.role,
            thresholds,
            gate: TeleportGate::new(config.teleport_cooldown, &thresholds),
            search_mode: config.search_mode,
            search_limits: config.search_limits,
        }
    }

    /// Whether the agent should leave through the exit when standing on it
    pub fn exit_ready(&self, state: &AgentState) -> bool {
        if state.all_goals_collected() || state.below_budget_fraction(self.thresholds.time_crunch)
        {
            return true;
        }
        match (self.thresholds.far_exit_distance, state.exit) {
            (Some(limit), Some(exit)) => state.position.manhattan(exit) > limit,
            _ => false,
        }
    }

    /// Exit to walk toward this turn, if it is time to head there
    pub fn exit_target(&self, state: &AgentState) -> Option<Position> {
        let exit = state.exit?;
        let late = self
            .thresholds
            .late_pursuit
            .is_some_and(|fraction| state.below_budget_fraction(fraction));
        (self.exit_ready(state) || late).then_some(exit)
    }

    /// Cells worth exploring toward: the frontier, plus uncollected goals for
    /// roles that chase them
    pub fn explore_targets(&self, state: &AgentState) -> HashSet<Position> {
        let mut targets = state.frontier.clone();
        if self.role.chases_goals() {
            targets.extend(state.outstanding_goals());
        }
        targets
    }

    /// Choose this turn's action and apply its effect on `state`.
    ///
    /// Never fails: if every cardinal neighbour is a wall the role's fixed
    /// fallback direction is returned and the position is left unchanged.
    pub fn decide(
        &self,
        state: &mut AgentState,
        percepts: &Percepts,
        rng: &mut AgentRng,
    ) -> (Decision, Action) {
        match percepts.here() {
            CellCategory::Goal(_) if !state.collected_goals.contains(&state.position) => {
                state.collect_goal_here();
                return (Decision::CollectGoal, Action::Activate);
            }
            CellCategory::Exit if self.exit_ready(state) => {
                return (Decision::UseExit, Action::Activate);
            }
            CellCategory::Teleport(color)
                if self.gate.allow_use(color, state.turns_left(), state) =>
            {
                state.use_teleport(color);
                return (Decision::UseTeleport, Action::Activate);
            }
            _ => {}
        }

        state.update_frontier(percepts);
        state.prune_frontier();

        if let Some((decision, dir)) = self.plan_move(state) {
            if percepts.can_move(dir) {
                state.apply_move(dir);
                return (decision, Action::Move(dir));
            }
            log::debug!("planned {dir} runs into an unseen wall, replanning");
        }

        (Decision::RandomFallback, self.fallback_move(state, percepts, rng))
    }

    fn plan_move(&self, state: &AgentState) -> Option<(Decision, Direction)> {
        let search = FrontierSearch::for_state(state, self.search_mode, &self.search_limits);

        if let Some(exit) = self.exit_target(state) {
            let targets: HashSet<Position> = [exit].into_iter().collect();
            if let Some(dir) = search.step(state, &targets) {
                return Some((Decision::PursueExit, dir));
            }
        }

        let targets = self.explore_targets(state);
        search
            .step(state, &targets)
            .map(|dir| (Decision::Explore, dir))
    }

    fn fallback_move(
        &self,
        state: &mut AgentState,
        percepts: &Percepts,
        rng: &mut AgentRng,
    ) -> Action {
        let open: Vec<Direction> = percepts.open_directions().collect();
        let fresh: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|&d| !state.recently_at(state.position.step(d)))
            .collect();

        let choice = rng.choose(&fresh).or_else(|| rng.choose(&open)).copied();
        match choice {
            Some(dir) => {
                state.apply_move(dir);
                Action::Move(dir)
            }
            None => {
                log::warn!(
                    "boxed in at {}, emitting default {}",
                    state.position,
                    self.thresholds.fallback
                );
                Action::Move(self.thresholds.fallback)
            }
        }
    }
}
