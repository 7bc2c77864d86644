//! ASCII maze maps
//!
//! One character per cell, one line per row:
//!
//! ```text
//! w   wall            .   floor
//! S   start (floor)   r   exit
//! 0-9 goal            o b y p  teleports (o<->b, y<->p)
//! ```
//!
//! Everything outside the drawn rectangle is wall. Positions are relative
//! to the start cell, so they line up with the agents' own coordinates.

use hashbrown::HashMap;
use maze_core::{CellCategory, Percepts, Position, TeleportColor};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no start cell 'S'")]
    MissingStart,

    #[error("map has more than one start cell (second at line {line}, column {column})")]
    DuplicateStart { line: usize, column: usize },

    #[error("teleport '{glyph}' appears more than once")]
    DuplicateTeleport { glyph: char },

    #[error("map is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeMap {
    cells: HashMap<Position, CellCategory>,
    teleports: HashMap<TeleportColor, Position>,
}

impl MazeMap {
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let mut start = None;
        for (line, row) in rows.iter().enumerate() {
            for (column, glyph) in row.chars().enumerate() {
                if glyph == 'S' {
                    if start.is_some() {
                        return Err(MapError::DuplicateStart { line, column });
                    }
                    start = Some((line as i32, column as i32));
                }
            }
        }
        let (start_row, start_col) = start.ok_or(MapError::MissingStart)?;

        let mut cells = HashMap::new();
        let mut teleports = HashMap::new();
        for (line, row) in rows.iter().enumerate() {
            for (column, glyph) in row.chars().enumerate() {
                let pos = Position::new(line as i32 - start_row, column as i32 - start_col);
                let category = CellCategory::from_code(glyph);
                if let CellCategory::Teleport(color) = category {
                    if teleports.insert(color, pos).is_some() {
                        return Err(MapError::DuplicateTeleport { glyph });
                    }
                }
                cells.insert(pos, category);
            }
        }

        Ok(Self { cells, teleports })
    }

    /// Contents of a cell; wall outside the map
    pub fn get(&self, pos: Position) -> CellCategory {
        self.cells.get(&pos).copied().unwrap_or(CellCategory::Wall)
    }

    pub fn set(&mut self, pos: Position, category: CellCategory) {
        self.cells.insert(pos, category);
    }

    /// 3×3 view around `pos`
    pub fn percepts_at(&self, pos: Position) -> Percepts {
        Percepts::from_fn(|slot| self.get(pos.offset(slot)))
    }

    /// Where activating `color` sends an agent
    pub fn teleport_destination(&self, color: TeleportColor) -> Option<Position> {
        self.teleports.get(&color.partner()).copied()
    }

    pub fn goal_count(&self) -> usize {
        self.cells
            .values()
            .filter(|c| matches!(c, CellCategory::Goal(_)))
            .count()
    }

    pub fn exit(&self) -> Option<Position> {
        self.cells
            .iter()
            .find(|(_, c)| matches!(c, CellCategory::Exit))
            .map(|(p, _)| *p)
    }
}
