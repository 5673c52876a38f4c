//! Axis-aligned collision detection
//!
//! Player and obstacles are plain rectangles. Overlap uses strict
//! inequalities, so rectangles that only share an edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Strict AABB overlap test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// Index of the first obstacle overlapping the player
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let rect = player.rect();
    obstacles.iter().position(|ob| overlaps(&rect, &ob.rect()))
}

/// Whether any obstacle overlaps the player
pub fn player_hit(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_hit(player, obstacles).is_some()
}
