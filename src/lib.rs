//! Gravity Flip - A gravity-inverting endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase machine, spawning, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame clock and input mapping
//! - `persistence`: Best score storage
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver tying the pieces together

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use persistence::{BestScore, ScoreStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Headless driver cadence (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frame cap for the headless demo run (5 minutes at 60 Hz)
    pub const MAX_HEADLESS_FRAMES: u32 = 60 * 60 * 5;

    /// Spike decoration on obstacles
    pub const SPIKE_COUNT: u32 = 5;
    pub const SPIKE_SIZE: f32 = 8.0;

    /// Offset of the guide lines drawn outside the ceiling/floor margins
    pub const GUIDE_OFFSET: f32 = 8.0;
}
