//! maze-test: ASCII maze host for exercising maze-core agents
//!
//! Provides a small simulator that owns the true maze, feeds each agent its
//! 3×3 view, relays (and optionally drops) messages and applies actions.

pub mod episode;
pub mod maze;

pub use episode::{Episode, EpisodeConfig, EpisodeReport, TurnRecord};
pub use maze::{MapError, MazeMap};
