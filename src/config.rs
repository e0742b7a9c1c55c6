//! Native runner configuration
//!
//! Read from the environment:
//! - `SKY_STRIKE_TUNING`: path to a tuning JSON file
//! - `SKY_STRIKE_SEED`: RNG seed (random when unset)
//! - `SKY_STRIKE_SAVE_DIR`: leaderboard directory
//! - `SKY_STRIKE_MAX_TICKS`: cap on the demo run length

use std::env;
use std::path::PathBuf;

use crate::tuning::{Tuning, TuningError};

pub const DEFAULT_SAVE_DIR: &str = ".sky-strike";
/// Ten minutes at 60 Hz
pub const DEFAULT_MAX_TICKS: u64 = 10 * 60 * 60;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub tuning_path: Option<PathBuf>,
    pub seed: u64,
    pub save_dir: PathBuf,
    pub max_ticks: u64,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self {
            tuning_path: env::var_os("SKY_STRIKE_TUNING").map(PathBuf::from),
            seed: read_env_u64("SKY_STRIKE_SEED").unwrap_or_else(rand::random),
            save_dir: env::var_os("SKY_STRIKE_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR)),
            max_ticks: read_env_u64("SKY_STRIKE_MAX_TICKS").unwrap_or(DEFAULT_MAX_TICKS),
        }
    }

    /// The configured tuning file, or the built-in defaults
    pub fn tuning(&self) -> Result<Tuning, TuningError> {
        match &self.tuning_path {
            Some(path) => Tuning::load(path),
            None => Ok(Tuning::default()),
        }
    }
}

fn read_env_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    parse_u64(name, &raw)
}

fn parse_u64(name: &str, raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("{name}={raw:?} is not a valid number, using default");
            None
        }
    }
}
