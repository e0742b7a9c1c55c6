//! Game state and core simulation types
//!
//! Everything mutable about a session lives in [`GameState`]; the host owns
//! the value and hands it to [`tick`](super::tick::tick) once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::spawn_interval_for;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until the pause input toggles again
    Paused,
    /// Lives ran out; only a reset leaves this phase
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal pixels per tick
    pub speed: f32,
}

impl Player {
    /// A player centered horizontally, `bottom_offset` above the field's bottom
    pub fn centered(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        let x = (tuning.field.width - p.width) / 2.0;
        let y = tuning.field.height - p.bottom_offset;
        Self {
            rect: Rect::new(x, y, p.width, p.height),
            speed: p.speed,
        }
    }

    pub fn move_left(&mut self) {
        self.rect.pos.x = (self.rect.pos.x - self.speed).max(0.0);
    }

    pub fn move_right(&mut self, field_width: f32) {
        let max_x = (field_width - self.rect.width()).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + self.speed).min(max_x);
    }
}

/// A player projectile travelling up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: f32,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.rect.translate_y(-self.speed);
    }

    /// Fully above the top edge
    pub fn is_off_top(&self) -> bool {
        self.rect.bottom() < 0.0
    }
}

/// A descending enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
}

impl Enemy {
    pub fn advance(&mut self) {
        self.rect.translate_y(self.speed);
    }

    /// Slipped past the bottom of the field
    pub fn has_breached(&self, field_height: f32) -> bool {
        self.rect.top() > field_height
    }
}

/// Why a life was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeLossCause {
    /// An enemy got past the bottom edge
    Breach,
    /// An enemy rammed the player
    Collision,
}

/// Something the host may want to render, announce or persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    EnemyDestroyed { at: Vec2, score: u64 },
    LifeLost { cause: LifeLossCause, lives: u8 },
    LevelUp { level: u32, bonus_life: bool },
    GameOver { score: u64, level: u32 },
}

/// HUD counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives spawn positions and sizes
    pub(crate) rng: Pcg32,
    /// Balance sheet this session runs on
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current level (starts at 1)
    pub level: u32,
    /// Enemies destroyed by bullets this session
    pub kills: u32,
    /// Speed given to newly spawned enemies
    pub enemy_speed: f32,
    /// Minimum gap between enemy spawns (ms)
    pub spawn_interval_ms: f64,
    /// Accumulated play time (ms); frozen while paused
    pub clock_ms: f64,
    /// `clock_ms` at the last enemy spawn
    pub last_spawn_ms: f64,
    /// Ticks processed while playing
    pub time_ticks: u64,
    pub player: Player,
    /// Live bullets in spawn order
    pub bullets: Vec<Bullet>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Set while a held fire input has already produced its bullet
    pub(crate) fire_latch: bool,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session on a custom balance sheet
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.start_lives,
            level: 1,
            kills: 0,
            enemy_speed: tuning.enemy.base_speed,
            spawn_interval_ms: tuning.difficulty.base_spawn_interval_ms,
            clock_ms: 0.0,
            last_spawn_ms: 0.0,
            time_ticks: 0,
            player: Player::centered(&tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            fire_latch: false,
            tuning,
        };
        state.reset();
        state
    }

    /// Start over: counters, entities and difficulty go back to level 1.
    /// Safe to call mid-game or after game over; the RNG keeps its stream.
    pub fn reset(&mut self) {
        let tuning = &self.tuning;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = tuning.start_lives;
        self.level = 1;
        self.kills = 0;
        self.enemy_speed = tuning.enemy.base_speed;
        self.spawn_interval_ms = spawn_interval_for(1, &tuning.difficulty);
        self.clock_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.time_ticks = 0;
        self.player = Player::centered(tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.fire_latch = false;
        log::info!("Game reset (seed {})", self.seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            level: self.level,
        }
    }
}
