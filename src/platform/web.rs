//! JavaScript bridge
//!
//! Exposes the simulation to a browser host. The host owns the canvas, the
//! DOM and `requestAnimationFrame`; it calls `frame` once per animation frame
//! and draws from `snapshot`. Everything crosses the boundary as JSON.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{frame_delta_ms, now_ms};
use crate::highscores::HighScores;
use crate::persistence::LocalStore;
use crate::sim::{Bullet, Enemy, GameEvent, GamePhase, GameState, Hud, Player, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Sky Strike core loaded");
}

/// Everything the render sink needs for one frame
#[derive(Serialize)]
struct Snapshot<'a> {
    player: &'a Player,
    bullets: &'a [Bullet],
    enemies: &'a [Enemy],
    hud: Hud,
    paused: bool,
    game_over: bool,
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    scores: HighScores,
    store: LocalStore,
    last_frame: Option<f64>,
    fire_was_down: bool,
    pause_requested: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let store = LocalStore::new();
        let scores = HighScores::load(&store);
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::new(seed),
            scores,
            store,
            last_frame: None,
            fire_was_down: false,
            pause_requested: false,
        }
    }

    /// Run one tick. `now_ms` is the `requestAnimationFrame` timestamp;
    /// the flags are the current key/button states. Returns the tick's
    /// events as a JSON array.
    pub fn frame(&mut self, now_ms: f64, left: bool, right: bool, fire: bool) -> String {
        let elapsed = frame_delta_ms(self.last_frame, now_ms);
        self.last_frame = Some(now_ms);

        let input = TickInput {
            move_left: left,
            move_right: right,
            fire,
            fire_pressed: fire && !self.fire_was_down,
            pause: std::mem::take(&mut self.pause_requested),
            idle_mode: false,
        };
        self.fire_was_down = fire;

        let events = tick(&mut self.state, &input, elapsed);
        for event in &events {
            if matches!(event, GameEvent::GameOver { .. }) {
                self.record(event);
            }
        }
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current entities and HUD as JSON
    pub fn snapshot(&self) -> String {
        let snapshot = Snapshot {
            player: &self.state.player,
            bullets: &self.state.bullets,
            enemies: &self.state.enemies,
            hud: self.state.hud(),
            paused: self.state.phase == GamePhase::Paused,
            game_over: self.state.is_game_over(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Leaderboard entries as JSON
    pub fn high_scores(&self) -> String {
        serde_json::to_string(&self.scores.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Pause/unpause on the next frame
    pub fn toggle_pause(&mut self) {
        self.pause_requested = true;
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_frame = None;
        self.fire_was_down = false;
        self.pause_requested = false;
    }
}

impl WebGame {
    fn record(&mut self, event: &GameEvent) {
        if self.scores.record(event, now_ms()).is_some() {
            if let Err(e) = self.scores.save(&mut self.store) {
                log::warn!("Failed to save high scores: {e}");
            }
        }
    }
}
