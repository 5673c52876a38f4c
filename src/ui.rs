//! HUD and overlay text
//!
//! Pure formatting of what the page shows; the wasm driver copies these
//! strings into the DOM.

use crate::sim::{GamePhase, GameState};

/// Per-frame HUD values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    /// Current speed over base speed
    pub speed_ratio: f64,
    pub score: f64,
    pub best: f64,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, best: f64) -> Self {
        Self {
            phase: state.phase,
            speed_ratio: state.counters.speed_ratio(&state.tuning),
            score: state.counters.score,
            best,
        }
    }

    pub fn speed_label(&self) -> String {
        format!("Speed: {:.2}x", self.speed_ratio)
    }

    pub fn score_label(&self) -> String {
        format!("Score: {:.0}", self.score)
    }

    pub fn best_label(&self) -> String {
        format!("Best: {:.0}", self.best)
    }

    /// Overlay to show, if any
    pub fn overlay(&self) -> Option<Overlay> {
        match self.phase {
            GamePhase::Ready => Some(Overlay {
                title: "Gravity Flip".to_string(),
                subtitle: "Click, tap, or press Space / Up to flip gravity and dodge the spikes."
                    .to_string(),
                hint: None,
                button: "Start".to_string(),
            }),
            GamePhase::Over => Some(Overlay {
                title: "Game Over".to_string(),
                subtitle: format!("Score: {:.0}   |   Best: {:.0}", self.score, self.best),
                hint: Some("Give it one more go!".to_string()),
                button: "Try again".to_string(),
            }),
            GamePhase::Running | GamePhase::Paused => None,
        }
    }

    pub fn pause_control(&self) -> PauseControl {
        if self.phase == GamePhase::Paused {
            PauseControl {
                icon: "\u{25B6}",
                label: "Resume",
                paused: true,
            }
        } else {
            PauseControl {
                icon: "\u{275A}\u{275A}",
                label: "Pause",
                paused: false,
            }
        }
    }
}

/// Start / game-over panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub subtitle: String,
    /// Smaller second line under the subtitle
    pub hint: Option<String>,
    pub button: String,
}

/// Pause button face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseControl {
    pub icon: &'static str,
    /// Accessible label
    pub label: &'static str,
    pub paused: bool,
}

/// Help topics behind the tab buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTopic {
    Controls,
    Rules,
}

impl InfoTopic {
    /// Look up a topic by its `data-info` key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "controls" => Some(InfoTopic::Controls),
            "rules" => Some(InfoTopic::Rules),
            _ => None,
        }
    }

    pub fn panel(self) -> InfoPanel {
        match self {
            InfoTopic::Controls => InfoPanel {
                title: "How to play",
                items: &[
                    "PC: click, Space or \u{2191} to flip gravity",
                    "Mobile: tap anywhere on the play area to flip gravity",
                    "Input only counts inside the play area.",
                ],
            },
            InfoTopic::Rules => InfoPanel {
                title: "Rules",
                items: &[
                    "The runner moves forward on its own.",
                    "Touching an obstacle ends the game.",
                    "Speed keeps rising the longer you survive.",
                ],
            },
        }
    }
}

/// Help popup contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoPanel {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_fresh_run_labels() {
        let state = GameState::new(Tuning::default(), 1);
        let hud = HudSnapshot::capture(&state, 0.0);
        assert_eq!(hud.speed_label(), "Speed: 1.00x");
        assert_eq!(hud.score_label(), "Score: 0");
        assert_eq!(hud.best_label(), "Best: 0");
        assert_eq!(hud.overlay().unwrap().button, "Start");
    }

    #[test]
    fn test_speed_ratio_tracks_counters() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.start();
        state.counters.speed = 7.5;
        state.counters.score = 1234.6;
        let hud = HudSnapshot::capture(&state, 2000.0);
        assert_eq!(hud.speed_label(), "Speed: 1.50x");
        assert_eq!(hud.score_label(), "Score: 1235");
        assert!(hud.overlay().is_none());
    }

    #[test]
    fn test_game_over_overlay_shows_scores() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.phase = GamePhase::Over;
        state.counters.score = 1500.0;
        let hud = HudSnapshot::capture(&state, 1500.0);
        let overlay = hud.overlay().unwrap();
        assert_eq!(overlay.title, "Game Over");
        assert_eq!(overlay.subtitle, "Score: 1500   |   Best: 1500");
        assert_eq!(overlay.hint.as_deref(), Some("Give it one more go!"));
        assert_eq!(overlay.button, "Try again");
    }

    #[test]
    fn test_start_overlay_has_no_hint() {
        let state = GameState::new(Tuning::default(), 1);
        let overlay = HudSnapshot::capture(&state, 0.0).overlay().unwrap();
        assert_eq!(overlay.hint, None);
    }

    #[test]
    fn test_info_topics_by_key() {
        assert_eq!(InfoTopic::from_key("controls"), Some(InfoTopic::Controls));
        assert_eq!(InfoTopic::from_key("rules"), Some(InfoTopic::Rules));
        assert_eq!(InfoTopic::from_key("credits"), None);
        assert_eq!(InfoTopic::from_key(""), None);

        let controls = InfoTopic::Controls.panel();
        assert_eq!(controls.title, "How to play");
        assert_eq!(controls.items.len(), 3);
        assert!(controls.items[2].contains("inside the play area"));

        let rules = InfoTopic::Rules.panel();
        assert_eq!(rules.title, "Rules");
        assert_eq!(rules.items.len(), 3);
        assert!(rules.items.iter().any(|item| item.contains("obstacle")));
    }

    #[test]
    fn test_pause_control_face() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.phase = GamePhase::Paused;
        assert!(HudSnapshot::capture(&state, 0.0).pause_control().paused);
        state.phase = GamePhase::Running;
        assert_eq!(HudSnapshot::capture(&state, 0.0).pause_control().label, "Pause");
    }
}
