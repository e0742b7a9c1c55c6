//! Collision detection between bullets, enemies and the player
//!
//! Everything is an axis-aligned box, so a hit is a strict min/max overlap.
//! The resolver only reports data; callers decide what a hit means.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Bullet, Enemy};

/// Overlap after shrinking both boxes by `margin` on every side
#[inline]
pub fn overlap_with_margin(a: &Rect, b: &Rect, margin: f32) -> bool {
    a.shrink(margin).overlaps(&b.shrink(margin))
}

/// A bullet/enemy pair that destroyed each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the bullet list passed to [`resolve_hits`]
    pub bullet: usize,
    /// Index into the enemy list passed to [`resolve_hits`]
    pub enemy: usize,
    /// Center of the destroyed enemy
    pub at: Vec2,
}

/// Result of one resolver pass
#[derive(Debug, Clone, Default)]
pub struct HitResolution {
    /// Matched pairs in bullet order
    pub hits: Vec<Hit>,
    /// Bullets that hit nothing, in their original order
    pub bullets: Vec<Bullet>,
    /// Enemies that were not hit, in their original order
    pub enemies: Vec<Enemy>,
}

/// Match bullets against enemies.
///
/// Bullets are scanned in spawn order; each one is consumed by the first
/// enemy (in spawn order) it overlaps that no earlier bullet has claimed.
/// A bullet therefore destroys at most one enemy and an enemy absorbs at
/// most one bullet, even when several boxes overlap in the same tick.
/// Survivors are rebuilt from the inputs rather than removed in place.
pub fn resolve_hits(bullets: Vec<Bullet>, enemies: Vec<Enemy>) -> HitResolution {
    let mut enemy_hit = vec![false; enemies.len()];
    let mut bullet_spent = vec![false; bullets.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let target = (0..enemies.len())
            .find(|&ei| !enemy_hit[ei] && bullet.rect.overlaps(&enemies[ei].rect));
        if let Some(ei) = target {
            enemy_hit[ei] = true;
            bullet_spent[bi] = true;
            hits.push(Hit {
                bullet: bi,
                enemy: ei,
                at: enemies[ei].rect.center(),
            });
        }
    }

    let bullets = bullets
        .into_iter()
        .zip(bullet_spent)
        .filter_map(|(b, spent)| (!spent).then_some(b))
        .collect();
    let enemies = enemies
        .into_iter()
        .zip(enemy_hit)
        .filter_map(|(e, hit)| (!hit).then_some(e))
        .collect();

    HitResolution {
        hits,
        bullets,
        enemies,
    }
}
