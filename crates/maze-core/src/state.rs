//! Per-agent world model
//!
//! Everything an agent knows about the maze lives in [`AgentState`]. It is
//! created once per episode and mutated in place every turn by percept
//! interpretation, message merging and action application.
//!
//! Invariants maintained here:
//! - `visited` only grows
//! - `frontier` and `visited` are disjoint after every update
//! - `collected_goals` is a subset of `seen_goals`
//! - `exit` is never replaced once set

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::consts::RECENT_HISTORY_LEN;
use crate::grid::{Direction, Position};
use crate::percept::{Percepts, TeleportColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Turn counter; -1 before the first turn
    pub turn: i64,
    /// Total turns in the episode
    pub max_turns: u32,
    pub position: Position,
    pub visited: HashSet<Position>,
    /// Known non-wall cells next to visited territory that were not entered yet
    pub frontier: HashSet<Position>,
    /// Walls seen in the local view; not shared with the other agent
    pub walls: HashSet<Position>,
    /// Latest known location of each teleport color
    pub teleports: HashMap<TeleportColor, Position>,
    pub seen_goals: HashSet<Position>,
    pub collected_goals: HashSet<Position>,
    pub exit: Option<Position>,
    pub last_teleport: Option<TeleportColor>,
    pub turns_since_teleport: u32,
    /// Last few positions moved into, oldest first
    pub recent: VecDeque<Position>,
}

impl AgentState {
    pub fn new(max_turns: u32) -> Self {
        Self {
            turn: -1,
            max_turns,
            position: Position::ORIGIN,
            visited: HashSet::new(),
            frontier: HashSet::new(),
            walls: HashSet::new(),
            teleports: HashMap::new(),
            seen_goals: HashSet::new(),
            collected_goals: HashSet::new(),
            exit: None,
            last_teleport: None,
            turns_since_teleport: 0,
            recent: VecDeque::with_capacity(RECENT_HISTORY_LEN),
        }
    }

    /// Advance the turn counter and the teleport timer
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        self.turns_since_teleport = self.turns_since_teleport.saturating_add(1);
    }

    /// Turns remaining in the budget, counting the current one
    pub fn turns_left(&self) -> i64 {
        i64::from(self.max_turns) - self.turn
    }

    /// Whether fewer than `fraction` of the budget remains
    pub fn below_budget_fraction(&self, fraction: f64) -> bool {
        (self.turns_left() as f64) < f64::from(self.max_turns) * fraction
    }

    /// Mark the current cell as visited
    pub fn visit_current(&mut self) {
        self.visited.insert(self.position);
        self.frontier.remove(&self.position);
    }

    /// Add every open, unvisited cardinal neighbour to the frontier
    pub fn update_frontier(&mut self, percepts: &Percepts) {
        for dir in percepts.open_directions() {
            let next = self.position.step(dir);
            if !self.visited.contains(&next) {
                self.frontier.insert(next);
            }
        }
    }

    /// Drop frontier cells that have been visited (by either agent)
    pub fn prune_frontier(&mut self) {
        let visited = &self.visited;
        self.frontier.retain(|p| !visited.contains(p));
    }

    /// Goals seen but not yet collected
    pub fn outstanding_goals(&self) -> HashSet<Position> {
        self.seen_goals
            .difference(&self.collected_goals)
            .copied()
            .collect()
    }

    pub fn all_goals_collected(&self) -> bool {
        self.seen_goals.is_subset(&self.collected_goals)
    }

    /// Record the goal under the agent as collected
    pub fn collect_goal_here(&mut self) {
        self.seen_goals.insert(self.position);
        self.collected_goals.insert(self.position);
    }

    /// Record a teleport activation
    pub fn use_teleport(&mut self, color: TeleportColor) {
        self.last_teleport = Some(color);
        self.turns_since_teleport = 0;
    }

    /// Apply a movement action and remember the cell moved into
    pub fn apply_move(&mut self, dir: Direction) {
        self.position = self.position.step(dir);
        if self.recent.len() == RECENT_HISTORY_LEN {
            self.recent.pop_front();
        }
        self.recent.push_back(self.position);
    }

    /// Whether `pos` was one of the last few cells moved into
    pub fn recently_at(&self, pos: Position) -> bool {
        self.recent.contains(&pos)
    }

    /// Number of cells the agent knows to be reachable or explored
    pub fn known_cells(&self) -> usize {
        self.visited.len() + self.frontier.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Compass;
    use crate::percept::CellCategory;

    fn walled_north() -> Percepts {
        Percepts::from_fn(|slot| match slot {
            Compass::North | Compass::NorthEast | Compass::NorthWest => CellCategory::Wall,
            _ => CellCategory::Free,
        })
    }

    #[test]
    fn test_new_state() {
        let state = AgentState::new(50);
        assert_eq!(state.turn, -1);
        assert_eq!(state.position, Position::ORIGIN);
        assert!(state.exit.is_none());
        assert_eq!(state.turns_left(), 51);
    }

    #[test]
    fn test_budget_fraction() {
        let mut state = AgentState::new(100);
        state.turn = 85;
        assert!(state.below_budget_fraction(0.2));
        state.turn = 80;
        assert!(!state.below_budget_fraction(0.2));
    }

    #[test]
    fn test_frontier_skips_walls_and_visited() {
        let mut state = AgentState::new(100);
        state.visited.insert(Position::new(0, -1));
        state.visit_current();
        state.update_frontier(&walled_north());

        let mut frontier: Vec<_> = state.frontier.iter().copied().collect();
        frontier.sort();
        assert_eq!(frontier, vec![Position::new(0, 1), Position::new(1, 0)]);

        state.update_frontier(&walled_north());
        assert_eq!(state.frontier.len(), 2);
    }

    #[test]
    fn test_prune_frontier() {
        let mut state = AgentState::new(100);
        state.frontier.insert(Position::new(0, 1));
        state.frontier.insert(Position::new(1, 0));
        state.visited.insert(Position::new(1, 0));
        state.prune_frontier();
        assert!(state.frontier.is_disjoint(&state.visited));
        assert_eq!(state.frontier.len(), 1);
    }

    #[test]
    fn test_recent_history_is_bounded() {
        let mut state = AgentState::new(100);
        for _ in 0..6 {
            state.apply_move(Direction::East);
        }
        assert_eq!(state.recent.len(), RECENT_HISTORY_LEN);
        assert_eq!(state.recent.back(), Some(&Position::new(0, 6)));
        assert_eq!(state.recent.front(), Some(&Position::new(0, 3)));
        assert!(state.recently_at(Position::new(0, 4)));
        assert!(!state.recently_at(Position::new(0, 2)));
    }

    #[test]
    fn test_goal_bookkeeping() {
        let mut state = AgentState::new(100);
        state.seen_goals.insert(Position::new(0, 2));
        assert!(!state.all_goals_collected());
        assert_eq!(state.outstanding_goals().len(), 1);

        state.position = Position::new(0, 2);
        state.collect_goal_here();
        assert!(state.all_goals_collected());
        assert!(state.outstanding_goals().is_empty());
    }
}
