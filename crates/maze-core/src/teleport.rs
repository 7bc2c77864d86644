//! Teleport arbitration
//!
//! Keeps an agent from bouncing between the two ends of a teleport pair.
//! The color used last may only be reused after the cooldown; its partner
//! color is refused outright until some other teleport is taken, since
//! using it would send the agent straight back.

use crate::config::PolicyThresholds;
use crate::percept::TeleportColor;
use crate::state::AgentState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportGate {
    /// Turns between two uses of the same color
    pub cooldown: u32,
    /// Role readiness: allowed below this fraction of turns left...
    pub budget_fraction: f64,
    /// ...or while the frontier is smaller than this
    pub frontier_cap: usize,
}

impl TeleportGate {
    pub fn new(cooldown: u32, thresholds: &PolicyThresholds) -> Self {
        Self {
            cooldown,
            budget_fraction: thresholds.teleport_budget,
            frontier_cap: thresholds.teleport_frontier,
        }
    }

    /// Whether the agent may activate the `color` teleport it stands on
    pub fn allow_use(&self, color: TeleportColor, turns_left: i64, state: &AgentState) -> bool {
        let cooled_down =
            state.last_teleport != Some(color) || state.turns_since_teleport >= self.cooldown;
        let round_trip = state.last_teleport.map(TeleportColor::partner) == Some(color);
        let ready = (turns_left as f64) < f64::from(state.max_turns) * self.budget_fraction
            || state.frontier.len() < self.frontier_cap;

        cooled_down && !round_trip && ready
    }
}
