//! Fixed constants shared by the decision core

/// Turns that must pass before the same teleport color may be used again
pub const TELEPORT_COOLDOWN: u32 = 3;

/// Number of recent positions kept for anti-oscillation
pub const RECENT_HISTORY_LEN: usize = 4;

/// Fraction of the budget below which every role heads for the exit
pub const TIME_CRUNCH_FRACTION: f64 = 0.2;

/// Manhattan distance beyond which the collector gives up on goals and leaves
pub const FAR_EXIT_DISTANCE: u32 = 15;

/// Minimum node expansions granted to a single search
pub const SEARCH_EXPANSION_FLOOR: usize = 256;

/// Extra node expansions granted per known (visited or frontier) cell
pub const SEARCH_EXPANSION_FACTOR: usize = 8;
