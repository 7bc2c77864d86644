//! Message exchange between the two agents
//!
//! Each turn an agent publishes a snapshot of what it knows and merges the
//! last snapshot it received from its partner. Merging is a union for every
//! set, latest-wins for teleports, and first-writer-wins for the exit, so it
//! is order-independent and idempotent. A lost or empty message is a no-op.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::percept::TeleportColor;
use crate::state::AgentState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Frontier cells the sender has not visited
    #[serde(default)]
    pub frontier: HashSet<Position>,
    #[serde(default)]
    pub visited: HashSet<Position>,
    #[serde(default)]
    pub exit: Option<Position>,
    #[serde(default)]
    pub teleports: HashMap<TeleportColor, Position>,
    /// Goals the sender has seen but nobody has collected yet
    #[serde(default)]
    pub goals: HashSet<Position>,
    #[serde(default)]
    pub collected_goals: HashSet<Position>,
}

impl Message {
    /// Snapshot of an agent's knowledge
    pub fn from_state(state: &AgentState) -> Self {
        Self {
            frontier: state.frontier.difference(&state.visited).copied().collect(),
            visited: state.visited.clone(),
            exit: state.exit,
            teleports: state.teleports.clone(),
            goals: state.outstanding_goals(),
            collected_goals: state.collected_goals.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
            && self.visited.is_empty()
            && self.exit.is_none()
            && self.teleports.is_empty()
            && self.goals.is_empty()
            && self.collected_goals.is_empty()
    }

    /// Merge this message into `state`.
    ///
    /// The frontier is pruned against the merged visited set afterwards.
    pub fn merge_into(&self, state: &mut AgentState) {
        if self.is_empty() {
            return;
        }

        if state.exit.is_none() {
            if let Some(exit) = self.exit {
                log::debug!("exit learned from partner at {exit}");
                state.exit = Some(exit);
            }
        }
        state
            .teleports
            .extend(self.teleports.iter().map(|(&c, &p)| (c, p)));
        state.visited.extend(self.visited.iter().copied());
        state.frontier.extend(self.frontier.iter().copied());
        state.seen_goals.extend(self.goals.iter().copied());
        state.seen_goals.extend(self.collected_goals.iter().copied());
        state
            .collected_goals
            .extend(self.collected_goals.iter().copied());
        state.prune_frontier();

        log::trace!(
            "merged message: {} visited, {} frontier, {} goals, {} collected",
            self.visited.len(),
            self.frontier.len(),
            self.goals.len(),
            self.collected_goals.len()
        );
    }
}
