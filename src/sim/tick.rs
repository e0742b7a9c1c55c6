//! Per-frame simulation step
//!
//! Motion is a constant step per tick; elapsed wall-clock time only gates
//! enemy spawning. The step order is fixed:
//!
//! 1. move the player
//! 2. fire
//! 3. spawn an enemy when the spawn interval has elapsed
//! 4. advance bullets, dropping those above the field
//! 5. advance enemies
//! 6. resolve bullet/enemy hits
//! 7. debit lives for breaching or ramming enemies
//! 8. apply level-ups
//! 9. end the game when no lives remain

use std::cmp::Ordering;

use super::collision::{overlap_with_margin, resolve_hits};
use super::difficulty;
use super::spawn::{spawn_bullet, spawn_enemy};
use super::state::{GameEvent, GamePhase, GameState, LifeLossCause};
use crate::tuning::FireMode;

/// Input flags for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Fire button is currently down
    pub fire: bool,
    /// Fire button went down since the previous tick (already debounced)
    pub fire_pressed: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

/// Advance the game by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    let input = if input.idle_mode {
        autopilot_input(state)
    } else {
        input.clone()
    };

    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    state.clock_ms += elapsed_ms;
    state.time_ticks += 1;

    // Movement
    if input.move_left {
        state.player.move_left();
    }
    if input.move_right {
        state.player.move_right(state.tuning.field.width);
    }

    // Fire
    if wants_fire(state, &input) {
        let bullet = spawn_bullet(&state.player, &state.tuning.bullet);
        state.bullets.push(bullet);
    }

    // Spawn
    if state.clock_ms - state.last_spawn_ms > state.spawn_interval_ms {
        let enemy = spawn_enemy(&mut state.rng, &state.tuning, state.enemy_speed);
        log::debug!(
            "Enemy spawned at x={:.1} (size {:.0})",
            enemy.rect.left(),
            enemy.rect.width()
        );
        state.enemies.push(enemy);
        state.last_spawn_ms = state.clock_ms;
    }

    // Bullets travel up and leave through the top
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| !b.is_off_top());

    for enemy in &mut state.enemies {
        enemy.advance();
    }

    // Bullet/enemy hits
    let resolution = resolve_hits(
        std::mem::take(&mut state.bullets),
        std::mem::take(&mut state.enemies),
    );
    state.bullets = resolution.bullets;
    state.enemies = resolution.enemies;
    for hit in resolution.hits {
        state.score = state.score.saturating_add(state.tuning.score_per_kill);
        state.kills += 1;
        log::debug!("Enemy destroyed at ({:.1}, {:.1})", hit.at.x, hit.at.y);
        events.push(GameEvent::EnemyDestroyed {
            at: hit.at,
            score: state.score,
        });
    }

    // Breaches and rams
    let field_height = state.tuning.field.height;
    let margin = state.tuning.enemy.contact_margin;
    let player_rect = state.player.rect;
    let mut losses = Vec::new();
    state.enemies.retain(|enemy| {
        if enemy.has_breached(field_height) {
            losses.push(LifeLossCause::Breach);
            false
        } else if overlap_with_margin(&enemy.rect, &player_rect, margin) {
            losses.push(LifeLossCause::Collision);
            false
        } else {
            true
        }
    });
    for cause in losses {
        if state.lives == 0 {
            break;
        }
        state.lives -= 1;
        log::info!("Life lost ({:?}), {} left", cause, state.lives);
        events.push(GameEvent::LifeLost {
            cause,
            lives: state.lives,
        });
    }

    // Level-ups; a tick that takes the last life does not level up
    if state.lives > 0 {
        while let Some(up) = difficulty::evaluate(
            state.score,
            state.level,
            state.enemy_speed,
            &state.tuning.difficulty,
        ) {
            state.level = up.level;
            state.enemy_speed = up.enemy_speed;
            state.spawn_interval_ms = up.spawn_interval_ms;
            if up.bonus_life {
                state.lives = state.lives.saturating_add(1);
            }
            log::info!(
                "Level {} (enemy speed {:.1}, spawn every {:.0} ms{})",
                up.level,
                up.enemy_speed,
                up.spawn_interval_ms,
                if up.bonus_life { ", bonus life" } else { "" }
            );
            events.push(GameEvent::LevelUp {
                level: up.level,
                bonus_life: up.bonus_life,
            });
        }
    }

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, level {}", state.score, state.level);
        events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }

    events
}

/// Decide whether this tick fires, updating the press latch
fn wants_fire(state: &mut GameState, input: &TickInput) -> bool {
    match state.tuning.fire_mode {
        FireMode::Held => input.fire || input.fire_pressed,
        FireMode::Edge => {
            let edge = input.fire_pressed || (input.fire && !state.fire_latch);
            state.fire_latch = input.fire;
            edge
        }
    }
}

/// Inputs the demo autopilot would give for the current state.
///
/// Chases the lowest enemy and fires while lined up under it, releasing the
/// trigger every other tick so edge-triggered fire keeps re-arming.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    let target = state.enemies.iter().max_by(|a, b| {
        a.rect
            .bottom()
            .partial_cmp(&b.rect.bottom())
            .unwrap_or(Ordering::Equal)
    });

    if let Some(enemy) = target {
        let dx = enemy.rect.center().x - state.player.rect.center().x;
        let dead_zone = state.player.speed.max(1.0);
        input.move_left = dx < -dead_zone;
        input.move_right = dx > dead_zone;
        let aligned = dx.abs() <= enemy.rect.width() / 2.0;
        input.fire = aligned && state.time_ticks.is_multiple_of(2);
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Bullet, Enemy};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f64 = crate::consts::SIM_DT_MS;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, 50.0, 50.0),
            speed: 2.0,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            rect: Rect::new(x, y, 5.0, 10.0),
            speed: 8.0,
        }
    }

    #[test]
    fn test_fire_once_and_bullet_leaves_top() {
        let mut state = GameState::new(1);
        assert_eq!(state.player.rect.left(), 375.0);

        let fire = TickInput {
            fire: true,
            fire_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 0.0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.left(), 397.5);
        assert_eq!(state.bullets[0].rect.top(), 492.0);

        // y = 500 - 8n; still visible at n = 63 (bottom edge at +6)
        for _ in 2..=63 {
            tick(&mut state, &idle(), 0.0);
        }
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.top(), -4.0);

        // n = 64: bottom edge at -2, gone this very tick
        tick(&mut state, &idle(), 0.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_breach_costs_exactly_one_life() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(0.0, -50.0));

        for _ in 0..325 {
            let events = tick(&mut state, &idle(), 0.0);
            assert!(events.is_empty());
        }
        assert_eq!(state.enemies[0].rect.top(), 600.0);
        assert_eq!(state.lives, 3);

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost {
                cause: LifeLossCause::Breach,
                lives: 2
            }]
        );
        assert!(state.enemies.is_empty());

        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_one_pixel_hit_scores_ten() {
        let mut state = GameState::new(1);
        // After one step: enemy spans y 102..152, bullet y 151..161; 1px on x too
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(96.0, 159.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(
            events,
            vec![GameEvent::EnemyDestroyed {
                at: Vec2::new(125.0, 127.0),
                score: 10
            }]
        );
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_no_score_without_hits() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(300.0, 300.0));
        for _ in 0..10 {
            tick(&mut state, &idle(), 0.0);
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn test_level_up_on_exact_threshold() {
        let mut state = GameState::new(1);
        state.score = 990;
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(110.0, 150.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(state.score, 1000);
        assert_eq!(state.level, 2);
        assert_eq!(state.spawn_interval_ms, 900.0);
        assert_eq!(state.enemy_speed, 2.5);
        let level_ups: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(
            level_ups,
            vec![&GameEvent::LevelUp {
                level: 2,
                bonus_life: false
            }]
        );

        let events = tick(&mut state, &idle(), 0.0);
        assert!(events.is_empty());
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_level_up_speed_only_affects_new_enemies() {
        let mut state = GameState::new(1);
        state.score = 990;
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(600.0, 0.0));
        state.bullets.push(bullet_at(110.0, 150.0));

        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 1);

        // 900 ms interval at level 2
        tick(&mut state, &idle(), 1000.0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].speed, 2.0);
        assert_eq!(state.enemies[0].rect.top(), 4.0);
        assert_eq!(state.enemies[1].speed, 2.5);
    }

    #[test]
    fn test_level_ups_stop_at_max_level() {
        let mut state = GameState::new(1);
        state.level = u32::MAX - 1;
        state.score = u64::MAX - 10;
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(110.0, 150.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(state.level, u32::MAX);
        let level_ups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);

        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.level, u32::MAX);
    }

    #[test]
    fn test_multiple_level_ups_in_one_tick() {
        let mut tuning = Tuning::default();
        tuning.difficulty.level_threshold = 10;
        let mut state = GameState::with_tuning(1, tuning);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(300.0, 100.0));
        state.bullets.push(bullet_at(110.0, 150.0));
        state.bullets.push(bullet_at(310.0, 150.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(state.score, 20);
        assert_eq!(state.level, 3);
        // Level 3 grants a life
        assert_eq!(state.lives, 4);
        assert_eq!(
            &events[2..],
            &[
                GameEvent::LevelUp {
                    level: 2,
                    bonus_life: false
                },
                GameEvent::LevelUp {
                    level: 3,
                    bonus_life: true
                },
            ]
        );
    }

    #[test]
    fn test_last_life_ends_game_and_freezes() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.score = 40;
        state.enemies.push(enemy_at(0.0, 599.0));
        state.enemies.push(enemy_at(600.0, 100.0));

        let events = tick(&mut state, &idle(), FRAME_MS);
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost {
                    cause: LifeLossCause::Breach,
                    lives: 0
                },
                GameEvent::GameOver { score: 40, level: 1 },
            ]
        );
        assert!(state.is_game_over());

        let frozen_enemy = state.enemies[0].rect;
        let frozen_player = state.player.rect;
        let input = TickInput {
            move_left: true,
            fire: true,
            fire_pressed: true,
            ..Default::default()
        };
        for _ in 0..100 {
            assert!(tick(&mut state, &input, FRAME_MS).is_empty());
        }
        assert_eq!(state.enemies[0].rect, frozen_enemy);
        assert_eq!(state.player.rect, frozen_player);
        assert!(state.bullets.is_empty());
        assert_eq!(state.lives, 0);

        state.reset();
        assert!(!state.is_game_over());
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.rect.left(), 370.0);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_simultaneous_breaches_floor_at_zero() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.enemies.push(enemy_at(0.0, 599.0));
        state.enemies.push(enemy_at(100.0, 599.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(state.lives, 0);
        assert!(state.enemies.is_empty());
        let lost = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count();
        assert_eq!(lost, 1);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_ramming_enemy_costs_a_life() {
        let mut state = GameState::new(1);
        // Lands squarely on the player after one step
        state.enemies.push(enemy_at(375.0, 478.0));

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost {
                cause: LifeLossCause::Collision,
                lives: 2
            }]
        );
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_graze_inside_margin_is_forgiven() {
        let mut state = GameState::new(1);
        // Overlaps the player's left edge by 5px after one step
        state.enemies.push(enemy_at(330.0, 478.0));
        let events = tick(&mut state, &idle(), 0.0);
        assert!(events.is_empty());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = GameState::new(1);
        tick(&mut state, &idle(), 500.0);
        tick(&mut state, &idle(), 500.0);
        // Exactly one interval elapsed: not yet strictly greater
        assert!(state.enemies.is_empty());

        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].rect.top(), -48.0);
        assert_eq!(state.last_spawn_ms, 1001.0);

        tick(&mut state, &idle(), 999.0);
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &idle(), 2.0);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_bad_elapsed_time_is_ignored() {
        let mut state = GameState::new(1);
        tick(&mut state, &idle(), f64::NAN);
        tick(&mut state, &idle(), -5000.0);
        tick(&mut state, &idle(), f64::INFINITY);
        assert_eq!(state.clock_ms, 0.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_edge_fire_needs_release() {
        let mut state = GameState::new(1);
        let held = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &held, 0.0);
        }
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &idle(), 0.0);
        tick(&mut state, &held, 0.0);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_held_fire_mode_fires_every_tick() {
        let mut tuning = Tuning::default();
        tuning.fire_mode = FireMode::Held;
        let mut state = GameState::with_tuning(1, tuning);
        let held = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &held, 0.0);
        }
        assert_eq!(state.bullets.len(), 5);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(100.0, 100.0));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Paused);
        let moving = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..120 {
            assert!(tick(&mut state, &moving, 100.0).is_empty());
        }
        assert_eq!(state.enemies[0].rect.top(), 100.0);
        assert_eq!(state.player.rect.left(), 375.0);
        assert_eq!(state.clock_ms, 0.0);

        // Unpausing also runs the tick
        tick(&mut state, &pause, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies[0].rect.top(), 102.0);
    }

    #[test]
    fn test_autopilot_chases_lowest_enemy() {
        let mut state = GameState::new(1);
        state.enemies.push(enemy_at(700.0, 0.0));
        state.enemies.push(enemy_at(0.0, 200.0));
        let input = autopilot_input(&state);
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(!input.fire);

        state.enemies.clear();
        state.enemies.push(enemy_at(380.0, 200.0));
        let input = autopilot_input(&state);
        assert!(!input.move_left && !input.move_right);
        assert!(input.fire);
    }

    #[test]
    fn test_idle_mode_scores() {
        let mut state = GameState::new(3);
        state.enemies.push(enemy_at(380.0, 0.0));
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &demo, 0.0);
        }
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for i in 0..2000u32 {
            let input = TickInput {
                move_left: i % 7 < 3,
                move_right: i % 11 < 4,
                fire: i % 5 == 0,
                ..Default::default()
            };
            let e1 = tick(&mut state1, &input, FRAME_MS);
            let e2 = tick(&mut state2, &input, FRAME_MS);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.rect, b.rect);
        }
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right, fire)| {
            TickInput {
                move_left,
                move_right,
                fire,
                ..Default::default()
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..600),
        ) {
            let mut tuning = Tuning::default();
            tuning.enemy.min_size = 30.0;
            tuning.enemy.max_size = 50.0;
            tuning.enemy.base_speed = 6.0;
            tuning.difficulty.level_threshold = 30;
            let mut state = GameState::with_tuning(seed, tuning);

            let mut level = state.level;
            for input in &inputs {
                let was_over = state.is_game_over();
                let lives_before = state.lives;
                let events = tick(&mut state, input, 120.0);

                let x = state.player.rect.left();
                prop_assert!(x >= 0.0 && x <= 800.0 - state.player.rect.width());
                prop_assert!(state.bullets.iter().all(|b| !b.is_off_top()));
                prop_assert!(state.enemies.iter().all(|e| !e.has_breached(600.0)));
                prop_assert!(state.level >= level);
                level = state.level;

                let kills = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                    .count() as u64;
                let game_overs = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                    .count();
                prop_assert_eq!(state.score % 10, 0);
                prop_assert_eq!(state.is_game_over(), state.lives == 0);
                if was_over {
                    prop_assert!(events.is_empty());
                } else {
                    prop_assert!(state.score >= kills * 10);
                    let ended = game_overs == 1;
                    prop_assert_eq!(ended, lives_before > 0 && state.lives == 0);
                }
            }
        }
    }
}
