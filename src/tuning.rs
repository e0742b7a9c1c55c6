//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can ship a JSON file instead
//! of recompiling. Missing sections fall back to the defaults below, which
//! reproduce the classic 800x600 board.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the fire input turns into bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// One bullet per discrete press
    #[default]
    Edge,
    /// One bullet every tick while fire is held
    Held,
}

/// Play field dimensions (pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per tick
    pub speed: f32,
    /// Distance from the player's top edge to the bottom of the field
    pub bottom_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            speed: 5.0,
            bottom_offset: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub width: f32,
    pub height: f32,
    /// Upward pixels per tick
    pub speed: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 10.0,
            speed: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Enemies are square; side length is drawn from `min_size..=max_size`
    pub min_size: f32,
    pub max_size: f32,
    /// Downward pixels per tick at level 1
    pub base_speed: f32,
    /// Inward margin applied to both boxes for enemy-vs-player contact
    pub contact_margin: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            min_size: 50.0,
            max_size: 50.0,
            base_speed: 2.0,
            contact_margin: 10.0,
        }
    }
}

/// Level progression curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Level N ends once score reaches `N * level_threshold`
    pub level_threshold: u64,
    /// Added to enemy speed on each level-up
    pub speed_increment: f32,
    /// Spawn interval at level 1 (ms)
    pub base_spawn_interval_ms: f64,
    /// Removed from the spawn interval per level above 1 (ms)
    pub spawn_interval_decrement_ms: f64,
    /// Spawn interval never drops below this (ms)
    pub min_spawn_interval_ms: f64,
    /// Every Nth level grants a life (0 disables)
    pub bonus_life_every: u32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            level_threshold: 1000,
            speed_increment: 0.5,
            base_spawn_interval_ms: 1000.0,
            spawn_interval_decrement_ms: 100.0,
            min_spawn_interval_ms: 300.0,
            bonus_life_every: 3,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub enemy: EnemyTuning,
    pub difficulty: DifficultyCurve,
    pub fire_mode: FireMode,
    pub start_lives: u8,
    pub score_per_kill: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field: FieldTuning::default(),
            player: PlayerTuning::default(),
            bullet: BulletTuning::default(),
            enemy: EnemyTuning::default(),
            difficulty: DifficultyCurve::default(),
            fire_mode: FireMode::Edge,
            start_lives: START_LIVES,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

/// Why a tuning could not be used
#[derive(Debug)]
pub enum TuningError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            Self::InvalidValue { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Read(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::InvalidValue { field, reason }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn positive_ms(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject balance sheets the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        if !positive(self.field.width) || !positive(self.field.height) {
            return Err(invalid("field", "width and height must be positive"));
        }
        if !positive(self.player.width) || !positive(self.player.height) {
            return Err(invalid("player", "width and height must be positive"));
        }
        if self.player.width > self.field.width {
            return Err(invalid("player.width", "player is wider than the field"));
        }
        if !self.player.speed.is_finite() || self.player.speed < 0.0 {
            return Err(invalid("player.speed", "must be zero or positive"));
        }
        if !positive(self.bullet.width) || !positive(self.bullet.height) {
            return Err(invalid("bullet", "width and height must be positive"));
        }
        if !positive(self.bullet.speed) {
            return Err(invalid("bullet.speed", "must be positive"));
        }
        if !positive(self.enemy.min_size) || !self.enemy.max_size.is_finite() {
            return Err(invalid("enemy.min_size", "must be positive"));
        }
        if self.enemy.max_size < self.enemy.min_size {
            return Err(invalid("enemy.max_size", "must not be below min_size"));
        }
        if !positive(self.enemy.base_speed) {
            return Err(invalid("enemy.base_speed", "must be positive"));
        }
        let curve = &self.difficulty;
        if curve.level_threshold == 0 {
            return Err(invalid("difficulty.level_threshold", "must be non-zero"));
        }
        if !curve.speed_increment.is_finite() || curve.speed_increment < 0.0 {
            return Err(invalid("difficulty.speed_increment", "must be zero or positive"));
        }
        if self.score_per_kill > curve.level_threshold {
            return Err(invalid(
                "score_per_kill",
                "must not exceed difficulty.level_threshold",
            ));
        }
        if !positive_ms(curve.min_spawn_interval_ms) {
            return Err(invalid("difficulty.min_spawn_interval_ms", "must be positive"));
        }
        if !positive_ms(curve.base_spawn_interval_ms)
            || curve.base_spawn_interval_ms < curve.min_spawn_interval_ms
        {
            return Err(invalid(
                "difficulty.base_spawn_interval_ms",
                "must not be below min_spawn_interval_ms",
            ));
        }
        if self.start_lives == 0 {
            return Err(invalid("start_lives", "must be at least 1"));
        }
        Ok(())
    }
}
