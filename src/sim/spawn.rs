//! Entity factories

use rand::Rng;

use super::rect::Rect;
use super::state::{Bullet, Enemy, Player};
use crate::tuning::{BulletTuning, Tuning};

/// A bullet centered on the player's nose, top edge level with the player's
pub fn spawn_bullet(player: &Player, bullet: &BulletTuning) -> Bullet {
    let x = player.rect.center().x - bullet.width / 2.0;
    Bullet {
        rect: Rect::new(x, player.rect.top(), bullet.width, bullet.height),
        speed: bullet.speed,
    }
}

/// A square enemy just above the top edge, at a random column that keeps it
/// fully inside the field horizontally
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, speed: f32) -> Enemy {
    let e = &tuning.enemy;
    let size = if e.max_size > e.min_size {
        rng.random_range(e.min_size..=e.max_size)
    } else {
        e.min_size
    };
    let max_x = (tuning.field.width - size).max(0.0);
    let x = if max_x > 0.0 {
        rng.random_range(0.0..=max_x)
    } else {
        0.0
    };
    Enemy {
        rect: Rect::new(x, -size, size, size),
        speed,
    }
}
