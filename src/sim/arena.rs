//! Playfield bounds
//!
//! The arena is the canvas rectangle `[0, width] x [0, height]` with the
//! origin in the top-left corner. The host may resize it between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, OFFSCREEN_MARGIN};

/// Which axes a circle would cross on its next step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCrossing {
    pub x: bool,
    pub y: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Larger of the two dimensions
    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Clamp a circle's centre so it stays fully inside the arena.
    ///
    /// An arena narrower than the circle pins the centre at `radius`
    /// instead of panicking like `f32::clamp` would.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            radius.max((self.width - radius).min(pos.x)),
            radius.max((self.height - radius).min(pos.y)),
        )
    }

    /// Axes on which a circle at `pos` pokes outside the arena
    pub fn crossing(&self, pos: Vec2, radius: f32) -> EdgeCrossing {
        EdgeCrossing {
            x: pos.x - radius < 0.0 || pos.x + radius > self.width,
            y: pos.y - radius < 0.0 || pos.y + radius > self.height,
        }
    }

    /// Whether a point has left the arena plus the off-screen margin
    pub fn is_offscreen(&self, pos: Vec2) -> bool {
        pos.x < -OFFSCREEN_MARGIN
            || pos.x > self.width + OFFSCREEN_MARGIN
            || pos.y < -OFFSCREEN_MARGIN
            || pos.y > self.height + OFFSCREEN_MARGIN
    }
}
