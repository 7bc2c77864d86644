//! Percept interpretation
//!
//! Classifies the nine visible cells and records the interesting ones
//! (exit, teleports, goals, walls) in the agent's world model. Never moves
//! the agent and never chooses an action.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::PerceptError;
use crate::grid::{Compass, Direction};
use crate::state::AgentState;

/// Teleport color; colors come in two reciprocal pairs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TeleportColor {
    Orange,
    Blue,
    Yellow,
    Purple,
}

impl TeleportColor {
    /// The color at the other end of this teleport pair
    pub const fn partner(self) -> Self {
        match self {
            TeleportColor::Orange => TeleportColor::Blue,
            TeleportColor::Blue => TeleportColor::Orange,
            TeleportColor::Yellow => TeleportColor::Purple,
            TeleportColor::Purple => TeleportColor::Yellow,
        }
    }

    pub const fn code(self) -> char {
        match self {
            TeleportColor::Orange => 'o',
            TeleportColor::Blue => 'b',
            TeleportColor::Yellow => 'y',
            TeleportColor::Purple => 'p',
        }
    }

    pub const fn from_code(c: char) -> Option<Self> {
        match c {
            'o' => Some(TeleportColor::Orange),
            'b' => Some(TeleportColor::Blue),
            'y' => Some(TeleportColor::Yellow),
            'p' => Some(TeleportColor::Purple),
            _ => None,
        }
    }
}

/// What a visible cell contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellCategory {
    Wall,
    #[default]
    Free,
    /// Goal with its digit id (0-9)
    Goal(u8),
    Teleport(TeleportColor),
    Exit,
}

impl CellCategory {
    /// Decode one host glyph. Unrecognised glyphs are floor: hosts draw
    /// open cells with several different characters.
    pub fn from_code(c: char) -> Self {
        match c {
            'w' => CellCategory::Wall,
            'r' => CellCategory::Exit,
            '0'..='9' => CellCategory::Goal(c as u8 - b'0'),
            _ => match TeleportColor::from_code(c) {
                Some(color) => CellCategory::Teleport(color),
                None => CellCategory::Free,
            },
        }
    }

    /// Canonical host glyph
    pub fn code(self) -> char {
        match self {
            CellCategory::Wall => 'w',
            CellCategory::Free => '.',
            CellCategory::Goal(id) => char::from(b'0' + id.min(9)),
            CellCategory::Teleport(color) => color.code(),
            CellCategory::Exit => 'r',
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, CellCategory::Wall)
    }

    /// Cells where the activate action does something
    pub const fn is_usable(self) -> bool {
        matches!(
            self,
            CellCategory::Goal(_) | CellCategory::Teleport(_) | CellCategory::Exit
        )
    }
}

/// The 3×3 view for one turn, indexed by [`Compass`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percepts {
    cells: [CellCategory; 9],
}

impl Percepts {
    pub fn new(cells: [CellCategory; 9]) -> Self {
        Self { cells }
    }

    /// Build a view slot by slot
    pub fn from_fn(mut f: impl FnMut(Compass) -> CellCategory) -> Self {
        let mut cells = [CellCategory::Free; 9];
        for slot in Compass::ALL {
            cells[slot.index()] = f(slot);
        }
        Self { cells }
    }

    /// Decode `(key, glyphs)` pairs as sent by a character-protocol host.
    ///
    /// Only the first glyph of each value is significant. All nine keys
    /// must be present.
    pub fn from_codes<I, K, V>(pairs: I) -> Result<Self, PerceptError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cells: [Option<CellCategory>; 9] = [None; 9];
        for (key, value) in pairs {
            let key = key.as_ref();
            let slot = Compass::from_key(key).ok_or_else(|| PerceptError::UnknownKey {
                key: key.to_string(),
            })?;
            let glyph = value
                .as_ref()
                .chars()
                .next()
                .ok_or(PerceptError::EmptyCode { slot })?;
            cells[slot.index()] = Some(CellCategory::from_code(glyph));
        }

        let mut decoded = [CellCategory::Free; 9];
        for slot in Compass::ALL {
            decoded[slot.index()] = cells[slot.index()].ok_or(PerceptError::MissingSlot { slot })?;
        }
        Ok(Self { cells: decoded })
    }

    pub fn get(&self, slot: Compass) -> CellCategory {
        self.cells[slot.index()]
    }

    /// Content of the agent's own cell
    pub fn here(&self) -> CellCategory {
        self.get(Compass::Here)
    }

    /// Content of the cardinal neighbour in `dir`
    pub fn toward(&self, dir: Direction) -> CellCategory {
        self.get(Compass::from(dir))
    }

    /// Whether a move in `dir` is legal according to this view
    pub fn can_move(&self, dir: Direction) -> bool {
        !self.toward(dir).is_wall()
    }

    /// Cardinal directions that are not walls, in [`Direction::ALL`] order
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.can_move(d))
    }
}

/// Record exit, teleports, goals and walls visible from the current
/// position.
///
/// A goal remembered under the agent that is no longer drawn there was
/// taken by the partner; it is recorded as collected.
pub fn observe(state: &mut AgentState, percepts: &Percepts) {
    let here = state.position;
    if !matches!(percepts.here(), CellCategory::Goal(_))
        && state.seen_goals.contains(&here)
        && state.collected_goals.insert(here)
    {
        log::debug!("goal at {here} is gone, marking it collected");
    }

    for slot in Compass::ALL {
        let pos = state.position.offset(slot);
        match percepts.get(slot) {
            CellCategory::Exit => {
                if state.exit.is_none() {
                    log::debug!("exit spotted at {pos}");
                    state.exit = Some(pos);
                }
            }
            CellCategory::Teleport(color) => {
                state.teleports.insert(color, pos);
            }
            CellCategory::Goal(_) => {
                if state.seen_goals.insert(pos) {
                    log::debug!("goal spotted at {pos}");
                }
            }
            CellCategory::Wall => {
                state.walls.insert(pos);
            }
            CellCategory::Free => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    fn view(codes: &[(&str, &str)]) -> Percepts {
        Percepts::from_codes(codes.iter().copied()).unwrap()
    }

    fn open_view() -> Vec<(&'static str, &'static str)> {
        Compass::ALL.iter().map(|c| (c.key(), ".")).collect()
    }

    #[test]
    fn test_cell_codes() {
        assert_eq!(CellCategory::from_code('w'), CellCategory::Wall);
        assert_eq!(CellCategory::from_code('r'), CellCategory::Exit);
        assert_eq!(CellCategory::from_code('7'), CellCategory::Goal(7));
        assert_eq!(
            CellCategory::from_code('y'),
            CellCategory::Teleport(TeleportColor::Yellow)
        );
        assert_eq!(CellCategory::from_code('g'), CellCategory::Free);
        assert_eq!(CellCategory::Goal(3).code(), '3');
    }

    #[test]
    fn test_teleport_pairs_are_reciprocal() {
        use strum::IntoEnumIterator;
        for color in TeleportColor::iter() {
            assert_ne!(color.partner(), color);
            assert_eq!(color.partner().partner(), color);
        }
    }

    #[test]
    fn test_from_codes_errors() {
        let mut codes = open_view();
        codes.pop();
        assert_eq!(
            Percepts::from_codes(codes),
            Err(PerceptError::MissingSlot {
                slot: Compass::NorthWest
            })
        );

        let mut codes = open_view();
        codes.push(("UP", "."));
        assert!(matches!(
            Percepts::from_codes(codes),
            Err(PerceptError::UnknownKey { .. })
        ));

        let mut codes = open_view();
        codes[0] = ("X", "");
        assert_eq!(
            Percepts::from_codes(codes),
            Err(PerceptError::EmptyCode { slot: Compass::Here })
        );
    }

    #[test]
    fn test_only_first_glyph_counts() {
        let mut codes = open_view();
        codes[1] = ("N", "wx");
        let p = view(&codes);
        assert!(!p.can_move(Direction::North));
        assert_eq!(
            p.open_directions().collect::<Vec<_>>(),
            vec![Direction::East, Direction::South, Direction::West]
        );
    }

    #[test]
    fn test_observe_records_features() {
        let mut state = AgentState::new(100);
        state.position = Position::new(2, 2);
        let mut codes = open_view();
        codes[2] = ("NE", "r");
        codes[3] = ("E", "o");
        codes[5] = ("S", "4");
        codes[7] = ("W", "w");
        observe(&mut state, &view(&codes));

        assert_eq!(state.exit, Some(Position::new(1, 3)));
        assert_eq!(
            state.teleports.get(&TeleportColor::Orange),
            Some(&Position::new(2, 3))
        );
        assert!(state.seen_goals.contains(&Position::new(3, 2)));
        assert!(state.walls.contains(&Position::new(2, 1)));
        assert_eq!(state.position, Position::new(2, 2));
    }

    #[test]
    fn test_observe_resolves_vanished_goal() {
        let mut state = AgentState::new(100);
        state.position = Position::new(0, 1);
        state.seen_goals.insert(Position::new(0, 1));
        state.seen_goals.insert(Position::new(0, 3));

        observe(&mut state, &view(&open_view()));

        assert!(state.collected_goals.contains(&Position::new(0, 1)));
        assert_eq!(
            state.outstanding_goals().into_iter().collect::<Vec<_>>(),
            vec![Position::new(0, 3)]
        );
    }

    #[test]
    fn test_observe_leaves_present_goal_alone() {
        let mut state = AgentState::new(100);
        state.seen_goals.insert(Position::ORIGIN);
        let mut codes = open_view();
        codes[0] = ("X", "5");

        observe(&mut state, &view(&codes));

        assert!(state.collected_goals.is_empty());
    }

    #[test]
    fn test_observe_keeps_first_exit_and_latest_teleport() {
        let mut state = AgentState::new(100);
        let mut codes = open_view();
        codes[1] = ("N", "r");
        codes[3] = ("E", "b");
        observe(&mut state, &view(&codes));

        state.position = Position::new(5, 5);
        observe(&mut state, &view(&codes));

        assert_eq!(state.exit, Some(Position::new(-1, 0)));
        assert_eq!(
            state.teleports.get(&TeleportColor::Blue),
            Some(&Position::new(5, 6))
        );
    }
}
