//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, overlaps, player_hit};
pub use spawn::Spawner;
pub use state::{Attachment, GamePhase, GameState, Gravity, Obstacle, Player, RunCounters};
pub use tick::{GameEvent, TickInput, tick};
