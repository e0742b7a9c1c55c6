//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Constant per-tick motion; wall-clock time only gates spawning
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, input or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, HitResolution, overlap_with_margin, resolve_hits};
pub use difficulty::{LevelUp, evaluate, spawn_interval_for};
pub use rect::Rect;
pub use spawn::{spawn_bullet, spawn_enemy};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Hud, LifeLossCause, Player,
};
pub use tick::{TickInput, autopilot_input, tick};
