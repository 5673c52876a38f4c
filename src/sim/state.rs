//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; nothing here touches the
//! DOM, the clock or storage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::Spawner;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Ready,
    /// Active gameplay
    Running,
    /// Frozen mid-run, resumes to Running
    Paused,
    /// Run ended on a collision
    Over,
}

/// Which edge the player rests against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gravity {
    #[default]
    Floor,
    Ceiling,
}

impl Gravity {
    /// +1 for floor, -1 for ceiling
    pub fn sign(self) -> i8 {
        match self {
            Gravity::Floor => 1,
            Gravity::Ceiling => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Floor => Gravity::Ceiling,
            Gravity::Ceiling => Gravity::Floor,
        }
    }
}

/// Edge an obstacle is fixed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Floor,
    Ceiling,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (x never changes during a run)
    pub pos: Vec2,
    pub size: Vec2,
    pub gravity: Gravity,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.floor_y()),
            size: Vec2::splat(tuning.player_size),
            gravity: Gravity::Floor,
        }
    }

    /// Flip gravity and snap to the resting coordinate of the new side
    pub fn invert(&mut self, tuning: &Tuning) {
        self.gravity = self.gravity.flipped();
        self.pos.y = Self::resting_y(self.gravity, tuning);
    }

    pub fn resting_y(gravity: Gravity, tuning: &Tuning) -> f32 {
        match gravity {
            Gravity::Floor => tuning.floor_y(),
            Gravity::Ceiling => tuning.ceil_y(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A spike block scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub attachment: Attachment,
}

impl Obstacle {
    /// Build an obstacle fixed to `attachment`, just off the right edge of the track
    pub fn spawn(attachment: Attachment, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.obstacle_width, tuning.obstacle_height);
        let y = match attachment {
            Attachment::Floor => tuning.track_height - tuning.ground_margin - size.y,
            Attachment::Ceiling => tuning.ceil_margin,
        };
        Self {
            pos: Vec2::new(tuning.track_width + size.x, y),
            size,
            attachment,
        }
    }

    /// Trailing edge has left the track by more than the despawn margin
    pub fn is_gone(&self, despawn_margin: f32) -> bool {
        self.pos.x + self.size.x < -despawn_margin
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Per-run difficulty and scoring counters
///
/// Double precision: these accumulate every tick for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Pixels advanced per tick
    pub speed: f64,
    /// Time-based score (100 per second)
    pub score: f64,
    /// Milliseconds since the last spawn
    pub spawn_timer: f64,
    /// Milliseconds between spawns
    pub spawn_interval: f64,
}

impl RunCounters {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.base_speed,
            score: 0.0,
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval_start,
        }
    }

    /// Speed relative to the starting speed (HUD multiplier)
    pub fn speed_ratio(&self, tuning: &Tuning) -> f64 {
        self.speed / tuning.base_speed
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub counters: RunCounters,
    pub tuning: Tuning,
    pub spawner: Spawner,
}

impl GameState {
    /// Create a new game state in the Ready phase
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: GamePhase::Ready,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            counters: RunCounters::new(&tuning),
            spawner: Spawner::new(seed),
            tuning,
        }
    }

    /// Put every run-scoped field back to its initial value
    pub fn reset(&mut self) {
        self.phase = GamePhase::Ready;
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.counters = RunCounters::new(&self.tuning);
    }

    /// Begin a fresh run from Ready or Over; ignored otherwise
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Ready | GamePhase::Over => {
                self.reset();
                self.phase = GamePhase::Running;
                true
            }
            GamePhase::Running | GamePhase::Paused => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
