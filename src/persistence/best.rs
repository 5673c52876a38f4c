//! Best score tracking
//!
//! A single number, stored as its decimal text so older saves stay readable.

use super::{STORAGE_KEY, ScoreStore};

/// Highest score reached across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BestScore {
    value: f64,
}

/// Parse a stored best score; anything unusable counts as absent
pub fn parse_best(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

impl BestScore {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Read the best score from `store`, falling back to 0
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.load_raw(STORAGE_KEY) {
            Ok(Some(raw)) => match parse_best(&raw) {
                Some(value) => {
                    log::info!("Loaded best score {:.0}", value);
                    Self::new(value)
                }
                None => {
                    log::warn!("Ignoring malformed best score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Best score unavailable, using 0 for this session: {}", e);
                Self::default()
            }
        }
    }

    /// Fold a finished run into the best score.
    ///
    /// Returns true if `score` is a new best. The in-memory value is raised
    /// even when the store rejects the write.
    pub fn record(&mut self, score: f64, store: &mut impl ScoreStore) -> bool {
        if score.is_nan() || score <= self.value {
            return false;
        }
        self.value = score;
        match store.save_raw(STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("New best score {:.0} saved", self.value),
            Err(e) => log::warn!("New best score {:.0} not saved: {}", self.value, e),
        }
        true
    }
}
