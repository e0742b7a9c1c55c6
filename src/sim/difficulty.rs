//! Level progression policy
//!
//! Pure functions: callers apply the returned values.

use crate::tuning::DifficultyCurve;

/// Outcome of crossing a level threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub enemy_speed: f32,
    pub spawn_interval_ms: f64,
    pub bonus_life: bool,
}

/// Spawn interval for a given level, floored at the curve minimum
pub fn spawn_interval_for(level: u32, curve: &DifficultyCurve) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    (curve.base_spawn_interval_ms - steps * curve.spawn_interval_decrement_ms)
        .max(curve.min_spawn_interval_ms)
}

/// Check whether `score` finishes `level`.
///
/// Returns the next level's parameters, or `None` while the score is still
/// below `level * level_threshold` or the level cannot go any higher. Only
/// one level is advanced per call. Enemy speed never drops to zero: a step
/// that would leave it non-positive keeps the current speed.
pub fn evaluate(score: u64, level: u32, enemy_speed: f32, curve: &DifficultyCurve) -> Option<LevelUp> {
    if curve.level_threshold == 0 {
        return None;
    }
    let target = u64::from(level).saturating_mul(curve.level_threshold);
    if score < target {
        return None;
    }

    let level = level.checked_add(1)?;
    let next_speed = enemy_speed + curve.speed_increment;
    let enemy_speed = if next_speed.is_finite() && next_speed > 0.0 {
        next_speed
    } else {
        enemy_speed
    };
    let bonus_life = curve.bonus_life_every > 0 && level % curve.bonus_life_every == 0;
    Some(LevelUp {
        level,
        enemy_speed,
        spawn_interval_ms: spawn_interval_for(level, curve),
        bonus_life,
    })
}
