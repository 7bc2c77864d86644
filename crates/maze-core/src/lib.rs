//! maze-core: decision core for two cooperating maze-exploring agents
//!
//! Each agent sees a 3×3 window of the maze every turn, may receive the
//! other agent's last message, and answers with exactly one action plus an
//! outgoing message. This crate contains all of that logic and no I/O:
//! the host that owns the maze, delivers messages and applies actions lives
//! outside of it.
//!
//! Per turn: percepts update the [`AgentState`], the inbound [`Message`] is
//! merged, the [`policy`] picks a [`Decision`] (calling into [`search`] and
//! [`teleport`] as needed) and the [`Agent`] returns a [`TurnOutcome`].

pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod message;
pub mod percept;
pub mod policy;
pub mod search;
pub mod state;
pub mod teleport;

mod consts;
mod rng;

pub use agent::{Agent, TurnOutcome};
pub use config::{AgentConfig, PolicyThresholds, Role, SearchLimits, SearchMode};
pub use consts::*;
pub use error::{AgentError, ConfigError, PerceptError};
pub use grid::{Compass, Direction, Position};
pub use message::Message;
pub use percept::{CellCategory, Percepts, TeleportColor};
pub use policy::{Action, Decision};
pub use rng::AgentRng;
pub use state::AgentState;
