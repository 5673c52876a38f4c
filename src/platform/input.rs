//! Input mapping
//!
//! Raw host events become logical actions, which are parked in a
//! single-slot pending set until the next frame consumes them.

use crate::sim::{GamePhase, TickInput};

/// Host events the game listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Mouse/pointer button pressed on the play area
    PointerDown { button: i16 },
    /// Touch began on the play area
    TouchStart,
    /// Key pressed anywhere in the window (`KeyboardEvent.code`)
    Key(String),
    /// Dedicated pause control clicked
    PauseControl,
    /// Overlay start/retry button clicked
    OverlayButton,
    /// Tab hidden or window lost focus
    FocusLost,
}

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InvertGravity,
    TogglePause,
    Start,
    Restart,
    /// Toggle demo mode (driver-level, never reaches the simulation)
    ToggleAutopilot,
}

/// Outcome of mapping one raw event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    pub action: Option<Action>,
    /// Suppress the host's default handling (scroll, page jump)
    pub prevent_default: bool,
}

impl InputResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn action(action: Action) -> Self {
        Self {
            action: Some(action),
            prevent_default: false,
        }
    }

    fn captured(action: Option<Action>) -> Self {
        Self {
            action,
            prevent_default: true,
        }
    }
}

/// Start or restart, depending on which overlay is showing
fn overlay_action(phase: GamePhase) -> Option<Action> {
    match phase {
        GamePhase::Ready => Some(Action::Start),
        GamePhase::Over => Some(Action::Restart),
        GamePhase::Running | GamePhase::Paused => None,
    }
}

fn pause_action(phase: GamePhase) -> Option<Action> {
    matches!(phase, GamePhase::Running | GamePhase::Paused).then_some(Action::TogglePause)
}

fn gravity_action(phase: GamePhase) -> Option<Action> {
    (phase != GamePhase::Over).then_some(Action::InvertGravity)
}

/// Map a raw event to an action given the current phase
pub fn map_input(raw: &RawInput, phase: GamePhase) -> InputResponse {
    match raw {
        RawInput::PointerDown { button: 0 } => InputResponse {
            action: gravity_action(phase),
            prevent_default: false,
        },
        RawInput::PointerDown { .. } => InputResponse::ignored(),
        // Touch on the play area never scrolls the page
        RawInput::TouchStart => InputResponse::captured(gravity_action(phase)),
        RawInput::Key(code) => match code.as_str() {
            "Space" | "ArrowUp" => InputResponse::captured(gravity_action(phase)),
            "Escape" | "KeyP" => InputResponse {
                action: pause_action(phase),
                prevent_default: false,
            },
            "Enter" => InputResponse {
                action: overlay_action(phase),
                prevent_default: false,
            },
            "KeyI" => InputResponse::action(Action::ToggleAutopilot),
            _ => InputResponse::ignored(),
        },
        RawInput::PauseControl => InputResponse {
            action: pause_action(phase),
            prevent_default: false,
        },
        RawInput::OverlayButton => InputResponse {
            action: overlay_action(phase),
            prevent_default: false,
        },
        RawInput::FocusLost => InputResponse {
            action: (phase == GamePhase::Running).then_some(Action::TogglePause),
            prevent_default: false,
        },
    }
}

/// Actions waiting for the next tick. Each slot is idempotent: queueing the
/// same action twice before a tick still applies it once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingActions {
    input: TickInput,
}

impl PendingActions {
    pub fn push(&mut self, action: Action) {
        match action {
            Action::InvertGravity => self.input.invert_gravity = true,
            Action::TogglePause => self.input.toggle_pause = true,
            Action::Start => self.input.start = true,
            Action::Restart => self.input.restart = true,
            Action::ToggleAutopilot => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Drain the pending set into one tick's input
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.input)
    }
}
