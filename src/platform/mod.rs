//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/frame deltas
//! - Input events

pub mod input;
pub mod time;

pub use input::{Action, InputResponse, PendingActions, RawInput, map_input};
pub use time::FrameClock;
