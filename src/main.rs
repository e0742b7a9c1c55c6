//! Sky Strike entry point
//!
//! Native builds run a headless attract-mode session: the autopilot plays
//! until the game ends, and the result goes on the local leaderboard.
//! The browser build is driven through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_strike::config::RunConfig;
    use sky_strike::consts::SIM_DT_MS;
    use sky_strike::persistence::FileStore;
    use sky_strike::platform::now_ms;
    use sky_strike::{GameEvent, GameState, HighScores, TickInput, tick};

    env_logger::init();
    log::info!("Sky Strike (native) starting...");

    let config = RunConfig::from_env();
    let tuning = match config.tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut store = FileStore::new(&config.save_dir);
    let mut scores = HighScores::load(&store);
    let mut state = GameState::with_tuning(config.seed, tuning);
    log::info!("Game initialized with seed: {}", config.seed);

    let demo = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut rank = None;
    for _ in 0..config.max_ticks {
        for event in tick(&mut state, &demo, SIM_DT_MS) {
            match event {
                GameEvent::LevelUp { level, bonus_life } => {
                    log::info!("Reached level {level}{}", if bonus_life { " (+1 life)" } else { "" });
                }
                GameEvent::GameOver { score, level } => {
                    log::info!("Final score {score} at level {level}");
                    rank = scores.record(&event, now_ms());
                }
                other => log::debug!("{other:?}"),
            }
        }
        if state.is_game_over() {
            break;
        }
    }

    if rank.is_some() {
        if let Err(e) = scores.save(&mut store) {
            log::warn!("Failed to save high scores to {}: {e}", store.dir().display());
        }
    }

    let hud = state.hud();
    let outcome = if state.is_game_over() { "game over" } else { "time up" };
    println!(
        "{outcome}: score {} | level {} | lives {} | {} kills in {} ticks",
        hud.score, hud.level, hud.lives, state.kills, state.time_ticks
    );
    if let Some(rank) = rank {
        println!("New high score, rank #{rank}!");
    }
    println!("\nHigh scores:");
    if scores.is_empty() {
        println!("  (none yet)");
    }
    for (i, entry) in scores.entries.iter().enumerate() {
        println!("  {}. {:>6}  level {}", i + 1, entry.score, entry.level);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
