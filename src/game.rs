//! Frame driver
//!
//! Owns the simulation, the frame clock, pending input and the best score.
//! Hosts call [`Game::handle_input`] from their event callbacks and
//! [`Game::frame`] once per animation frame.

use crate::persistence::{BestScore, ScoreStore};
use crate::platform::{Action, FrameClock, InputResponse, PendingActions, RawInput, map_input};
use crate::renderer::{FrameView, Renderer};
use crate::sim::{GameEvent, GamePhase, GameState, autopilot, tick};
use crate::tuning::Tuning;
use crate::ui::HudSnapshot;

/// Game instance holding all state
pub struct Game<S: ScoreStore> {
    state: GameState,
    clock: FrameClock,
    pending: PendingActions,
    best: BestScore,
    store: S,
    /// Demo mode - AI plays the game
    autopilot: bool,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let best = BestScore::load(&store);
        Self {
            clock: FrameClock::new(tuning.max_frame_ms),
            state: GameState::new(tuning, seed),
            pending: PendingActions::default(),
            best,
            store,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best(&self) -> f64 {
        self.best.value()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Map a host event and queue its action for the next frame
    pub fn handle_input(&mut self, raw: &RawInput) -> InputResponse {
        let response = map_input(raw, self.state.phase);
        if let Some(action) = response.action {
            self.queue(action);
        }
        response
    }

    /// Queue a logical action for the next frame
    pub fn queue(&mut self, action: Action) {
        match action {
            Action::ToggleAutopilot => self.set_autopilot(!self.autopilot),
            other => self.pending.push(other),
        }
    }

    /// Run one frame at host time `timestamp` (ms): tick, then draw
    pub fn frame(&mut self, timestamp: f64, renderer: &mut impl Renderer) -> Vec<GameEvent> {
        let dt = self.clock.advance(timestamp);

        let mut input = self.pending.take();
        if self.autopilot && autopilot::wants_flip(&self.state) {
            input.invert_gravity = true;
        }

        let events = tick(&mut self.state, &input, dt);
        for event in &events {
            if let GameEvent::Crashed { score } = event {
                self.best.record(*score, &mut self.store);
            }
        }

        if let Err(e) = renderer.draw(&FrameView::capture(&self.state)) {
            log::warn!("Render error: {}", e);
        }

        events
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state, self.best.value())
    }
}
