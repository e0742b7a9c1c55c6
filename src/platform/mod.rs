//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (leaderboard timestamps, frame deltas)
//! - The JavaScript bridge on wasm32

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Frame delta between two host timestamps, clamped so a stalled tab does
/// not dump a burst of spawns on resume
pub fn frame_delta_ms(last: Option<f64>, now: f64) -> f64 {
    const MAX_FRAME_MS: f64 = 100.0;
    match last {
        Some(last) if now.is_finite() && last.is_finite() => (now - last).clamp(0.0, MAX_FRAME_MS),
        _ => 0.0,
    }
}
