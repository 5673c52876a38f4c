//! Demo mode: a simple AI that plays the game
//!
//! Looks a fixed number of ticks ahead and flips when the current side is
//! about to be blocked and the other side is clear.

use super::state::{Attachment, GameState, Gravity, Obstacle};

/// Ticks of travel the autopilot looks ahead
pub const LOOKAHEAD_TICKS: f32 = 12.0;

fn blocks(obstacle: &Obstacle, gravity: Gravity) -> bool {
    matches!(
        (obstacle.attachment, gravity),
        (Attachment::Floor, Gravity::Floor) | (Attachment::Ceiling, Gravity::Ceiling)
    )
}

/// Whether the autopilot wants to flip gravity this tick
pub fn wants_flip(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let player = &state.player;
    let front = player.pos.x;
    let reach = player.pos.x + player.size.x + state.counters.speed as f32 * LOOKAHEAD_TICKS;

    // Obstacles the player has not cleared yet and will reach soon
    let ahead = state
        .obstacles
        .iter()
        .filter(|ob| ob.pos.x + ob.size.x > front && ob.pos.x < reach);

    let here = player.gravity;
    let there = here.flipped();
    let (mut blocked_here, mut blocked_there) = (false, false);
    for ob in ahead {
        blocked_here |= blocks(ob, here);
        blocked_there |= blocks(ob, there);
    }

    blocked_here && !blocked_there
}
