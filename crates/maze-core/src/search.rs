//! Frontier search
//!
//! A* over the four cardinal moves with unit step cost, toward the nearest
//! member of an arbitrary target set. The heuristic is the minimum
//! Manhattan distance to any target, which is admissible and consistent on
//! a uniform grid, so the first target popped is a nearest one.
//!
//! The search only knows what the caller tells it through the passability
//! predicate. In [`SearchMode::Optimistic`] every cell not known to be a
//! wall is assumed open, so a recommended first step can lead into a wall
//! nobody has seen yet; the policy catches that against the next percepts
//! and replans. The lattice is unbounded, so every search carries an
//! expansion cap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};

use crate::config::{SearchLimits, SearchMode};
use crate::grid::{Direction, Position};
use crate::state::AgentState;

/// A* node for the priority queue
#[derive(Clone, Copy, Eq, PartialEq)]
struct SearchNode {
    pos: Position,
    /// Cost from start
    g: u32,
    /// Distance estimate to the nearest target
    h: u32,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g.saturating_add(self.h)
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour: lowest f, then lowest h, then
        // lowest (row, col)
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum Manhattan distance from `pos` to any target
fn heuristic(pos: Position, targets: &HashSet<Position>) -> u32 {
    targets
        .iter()
        .map(|t| pos.manhattan(*t))
        .min()
        .unwrap_or(0)
}

/// Walk parent links back from `end` and report the first move out of `start`
fn first_step(
    came_from: &HashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Option<Direction> {
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            return Direction::between(start, current);
        }
        current = prev;
    }
    None
}

/// First cardinal direction on a shortest path from `start` to the nearest
/// member of `targets` other than `start` itself.
///
/// Returns `None` when no such target exists, when none is reachable
/// through cells accepted by `passable`, or when `max_expansions` nodes
/// were expanded without reaching one.
pub fn step_toward<F>(
    start: Position,
    targets: &HashSet<Position>,
    passable: F,
    max_expansions: usize,
) -> Option<Direction>
where
    F: Fn(Position) -> bool,
{
    if targets.contains(&start) {
        let rest: HashSet<Position> = targets.iter().copied().filter(|&p| p != start).collect();
        return step_toward(start, &rest, passable, max_expansions);
    }
    if targets.is_empty() {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut g_scores: HashMap<Position, u32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();

    g_scores.insert(start, 0);
    open.push(SearchNode {
        pos: start,
        g: 0,
        h: heuristic(start, targets),
    });

    let mut expansions = 0usize;
    while let Some(current) = open.pop() {
        if targets.contains(&current.pos) {
            log::trace!(
                "search {start} -> {} in {} steps, {expansions} expansions",
                current.pos,
                current.g
            );
            return first_step(&came_from, start, current.pos);
        }

        if !closed.insert(current.pos) {
            continue;
        }
        expansions += 1;
        if expansions > max_expansions {
            log::warn!("search from {start} gave up after {max_expansions} expansions");
            return None;
        }

        for (_, next) in current.pos.neighbors() {
            if closed.contains(&next) || !passable(next) {
                continue;
            }
            let new_g = current.g + 1;
            if new_g < g_scores.get(&next).copied().unwrap_or(u32::MAX) {
                g_scores.insert(next, new_g);
                came_from.insert(next, current.pos);
                open.push(SearchNode {
                    pos: next,
                    g: new_g,
                    h: heuristic(next, targets),
                });
            }
        }
    }

    None
}

/// Search configured for one agent's current knowledge
#[derive(Debug, Clone, Copy)]
pub struct FrontierSearch {
    pub mode: SearchMode,
    pub max_expansions: usize,
}

impl FrontierSearch {
    /// Scale the expansion cap with how much of the maze the agent knows
    pub fn for_state(state: &AgentState, mode: SearchMode, limits: &SearchLimits) -> Self {
        Self {
            mode,
            max_expansions: limits.budget_for(state.known_cells()),
        }
    }

    /// First step from the agent's position toward the nearest target
    pub fn step(&self, state: &AgentState, targets: &HashSet<Position>) -> Option<Direction> {
        match self.mode {
            SearchMode::Optimistic => step_toward(
                state.position,
                targets,
                |p| !state.walls.contains(&p),
                self.max_expansions,
            ),
            SearchMode::KnownCells => step_toward(
                state.position,
                targets,
                |p| {
                    !state.walls.contains(&p)
                        && (state.visited.contains(&p)
                            || state.frontier.contains(&p)
                            || targets.contains(&p))
                },
                self.max_expansions,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32)]) -> HashSet<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_empty_targets() {
        assert_eq!(step_toward(Position::ORIGIN, &HashSet::new(), |_| true, 100), None);
    }

    #[test]
    fn test_start_is_target() {
        assert_eq!(step_toward(Position::ORIGIN, &set(&[(0, 0)]), |_| true, 100), None);
    }

    #[test]
    fn test_start_among_other_targets() {
        assert_eq!(
            step_toward(Position::ORIGIN, &set(&[(0, 0), (0, 3)]), |_| true, 100),
            Some(Direction::East)
        );
    }

    #[test]
    fn test_straight_line() {
        assert_eq!(
            step_toward(Position::ORIGIN, &set(&[(0, 5)]), |_| true, 100),
            Some(Direction::East)
        );
        assert_eq!(
            step_toward(Position::ORIGIN, &set(&[(-3, 0)]), |_| true, 100),
            Some(Direction::North)
        );
    }

    #[test]
    fn test_picks_nearest_target() {
        let targets = set(&[(0, -6), (2, 0)]);
        assert_eq!(
            step_toward(Position::ORIGIN, &targets, |_| true, 100),
            Some(Direction::South)
        );
    }

    #[test]
    fn test_equidistant_targets_are_deterministic() {
        let targets = set(&[(0, 2), (0, -2), (2, 0), (-2, 0)]);
        let first = step_toward(Position::ORIGIN, &targets, |_| true, 100);
        for _ in 0..10 {
            assert_eq!(step_toward(Position::ORIGIN, &targets, |_| true, 100), first);
        }
        // Lowest (row, col) wins among equal priorities
        assert_eq!(first, Some(Direction::North));
    }

    #[test]
    fn test_routes_around_wall() {
        // Wall segment east of the start, open around it
        let walls = set(&[(-1, 1), (0, 1), (1, 1)]);
        let dir = step_toward(
            Position::ORIGIN,
            &set(&[(0, 2)]),
            |p| !walls.contains(&p),
            100,
        );
        assert!(matches!(dir, Some(Direction::North) | Some(Direction::South)));
    }

    #[test]
    fn test_unreachable_target() {
        let walls = set(&[(-1, 0), (1, 0), (0, -1), (0, 1)]);
        assert_eq!(
            step_toward(Position::ORIGIN, &set(&[(5, 5)]), |p| !walls.contains(&p), 100),
            None
        );
    }

    #[test]
    fn test_expansion_cap() {
        // Target sealed inside walls on an otherwise open, unbounded plane
        let walls = set(&[(9, 10), (11, 10), (10, 9), (10, 11)]);
        assert_eq!(
            step_toward(Position::ORIGIN, &set(&[(10, 10)]), |p| !walls.contains(&p), 500),
            None
        );
    }

    #[test]
    fn test_target_at_lattice_corner() {
        let targets = set(&[(i32::MIN, i32::MIN), (i32::MAX, i32::MAX)]);
        assert_eq!(step_toward(Position::ORIGIN, &targets, |_| true, 300), None);
    }

    #[test]
    fn test_known_cells_mode_refuses_unknown() {
        let mut state = AgentState::new(100);
        state.visit_current();
        state.frontier.insert(Position::new(0, 1));
        let exit = set(&[(0, 3)]);

        let strict = FrontierSearch {
            mode: SearchMode::KnownCells,
            max_expansions: 100,
        };
        assert_eq!(strict.step(&state, &exit), None);

        let optimistic = FrontierSearch {
            mode: SearchMode::Optimistic,
            max_expansions: 100,
        };
        assert_eq!(optimistic.step(&state, &exit), Some(Direction::East));

        state.frontier.insert(Position::new(0, 2));
        assert_eq!(strict.step(&state, &exit), Some(Direction::East));
    }
}
