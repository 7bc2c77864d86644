use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use proptest::prelude::*;

use maze_core::search::step_toward;
use maze_core::Position;

const SIZE: i32 = 8;

fn in_bounds(p: Position) -> bool {
    (0..SIZE).contains(&p.row) && (0..SIZE).contains(&p.col)
}

/// Reference breadth-first distance from `start` to the nearest target
fn bfs_distance(
    start: Position,
    targets: &HashSet<Position>,
    walls: &HashSet<Position>,
) -> Option<u32> {
    let mut dist: HashMap<Position, u32> = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        if targets.contains(&p) {
            return Some(d);
        }
        for (_, n) in p.neighbors() {
            if in_bounds(n) && !walls.contains(&n) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

fn cell() -> impl Strategy<Value = Position> {
    (0..SIZE, 0..SIZE).prop_map(|(r, c)| Position::new(r, c))
}

proptest! {
    #[test]
    fn repeated_steps_follow_a_shortest_path(
        walls in proptest::collection::vec(cell(), 0..24),
        start in cell(),
        targets in proptest::collection::vec(cell(), 1..4),
    ) {
        let walls: HashSet<Position> = walls.into_iter().filter(|p| *p != start).collect();
        let targets: HashSet<Position> = targets.into_iter().filter(|p| !walls.contains(p)).collect();
        prop_assume!(!targets.is_empty());

        let passable = |p: Position| in_bounds(p) && !walls.contains(&p);
        let Some(expected) = bfs_distance(start, &targets, &walls) else {
            prop_assert_eq!(step_toward(start, &targets, passable, 10_000), None);
            return Ok(());
        };

        let mut pos = start;
        let mut steps = 0;
        while !targets.contains(&pos) {
            let dir = step_toward(pos, &targets, passable, 10_000);
            prop_assert!(dir.is_some(), "no step from {} after {} steps", pos, steps);
            pos = pos.step(dir.unwrap());
            prop_assert!(passable(pos));
            steps += 1;
            prop_assert!(steps <= expected);
        }
        prop_assert_eq!(steps, expected);
    }
}

#[test]
fn open_grid_diagonal_distance() {
    let target: HashSet<Position> = [Position::new(4, 4)].into_iter().collect();
    let mut pos = Position::ORIGIN;
    let mut steps = 0;
    while pos != Position::new(4, 4) {
        let dir = step_toward(pos, &target, in_bounds, 1_000).expect("open grid is reachable");
        pos = pos.step(dir);
        steps += 1;
    }
    assert_eq!(steps, 8);
}
