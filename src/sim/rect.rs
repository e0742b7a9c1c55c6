//! Axis-aligned rectangle used for every entity on the field
//!
//! Screen coordinates: origin at the top-left, +y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Rect {
    /// Build a rectangle; negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height).max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: edges that merely touch do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shrink by `margin` on every side, keeping the center fixed.
    /// A margin larger than half the size collapses that axis to zero.
    pub fn shrink(&self, margin: f32) -> Rect {
        let margin = Vec2::splat(margin.max(0.0)).min(self.size * 0.5);
        Rect {
            pos: self.pos + margin,
            size: self.size - margin * 2.0,
        }
    }

    /// Move vertically by `dy`
    #[inline]
    pub fn translate_y(&mut self, dy: f32) {
        self.pos.y += dy;
    }
}
