//! Sky Strike - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Bounded best-of leaderboard
//! - `persistence`: Key/value storage backends
//! - `platform`: Browser/native platform abstraction

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use sim::{GameEvent, GameState, TickInput, tick};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame cadence driving `tick` (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Lives at the start of a session
    pub const START_LIVES: u8 = 3;
    /// Points per enemy shot down
    pub const SCORE_PER_KILL: u64 = 10;
}
