//! Data-driven game balance
//!
//! Every gameplay constant lives here so the web build can override them
//! from LocalStorage without a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("obstacles would cross the track midline (track height {track_height}, need at least {required})")]
    TrackTooShort { track_height: f32, required: f32 },

    #[error("spawn interval range is inverted ({floor} > {start})")]
    InvertedInterval { floor: f64, start: f64 },

    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

/// Game balance and track geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    pub track_width: f32,
    pub track_height: f32,
    /// Gap between the floor line and the bottom of the track
    pub ground_margin: f32,
    /// Gap between the top of the track and the ceiling line
    pub ceil_margin: f32,

    // === Player ===
    pub player_x: f32,
    pub player_size: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Obstacles are dropped once their trailing edge is this far left of the track
    pub despawn_margin: f32,

    // === Difficulty ===
    // f64 like the run counters they feed
    /// Pixels advanced per tick at the start of a run
    pub base_speed: f64,
    /// Speed gained per elapsed millisecond
    pub speed_increment: f64,
    /// Spawn interval at the start of a run (ms)
    pub spawn_interval_start: f64,
    /// Shortest spawn interval (ms)
    pub spawn_interval_floor: f64,
    /// Interval reduction per spawn (ms)
    pub spawn_interval_step: f64,

    // === Driver ===
    /// Longest frame delta fed to the simulation (ms)
    pub max_frame_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_width: 800.0,
            track_height: 400.0,
            ground_margin: 40.0,
            ceil_margin: 40.0,

            player_x: 130.0,
            player_size: 42.0,

            obstacle_width: 40.0,
            obstacle_height: 90.0,
            despawn_margin: 10.0,

            base_speed: 5.0,
            speed_increment: 0.0008,
            spawn_interval_start: 1000.0,
            spawn_interval_floor: 550.0,
            spawn_interval_step: 10.0,

            max_frame_ms: 100.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key for overrides
    pub const STORAGE_KEY: &'static str = "gravity_switcher_tuning";

    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the geometry and difficulty invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("track_width", f64::from(self.track_width)),
            ("player_size", f64::from(self.player_size)),
            ("obstacle_width", f64::from(self.obstacle_width)),
            ("obstacle_height", f64::from(self.obstacle_height)),
            ("base_speed", self.base_speed),
            ("spawn_interval_floor", self.spawn_interval_floor),
            ("max_frame_ms", self.max_frame_ms),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }
        let non_negative = [
            ("ground_margin", f64::from(self.ground_margin)),
            ("ceil_margin", f64::from(self.ceil_margin)),
            ("despawn_margin", f64::from(self.despawn_margin)),
            ("speed_increment", self.speed_increment),
            ("spawn_interval_step", self.spawn_interval_step),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }

        // Both obstacle kinds must stay on their own half of the track,
        // and the player must fit between the margins.
        let margin = self.ground_margin.max(self.ceil_margin);
        let required = 2.0 * (margin + self.obstacle_height.max(self.player_size));
        if !self.track_height.is_finite() || self.track_height < required {
            return Err(TuningError::TrackTooShort {
                track_height: self.track_height,
                required,
            });
        }

        if !self.spawn_interval_start.is_finite()
            || self.spawn_interval_floor > self.spawn_interval_start
        {
            return Err(TuningError::InvertedInterval {
                floor: self.spawn_interval_floor,
                start: self.spawn_interval_start,
            });
        }

        Ok(())
    }

    /// Player y when resting on the floor
    pub fn floor_y(&self) -> f32 {
        self.track_height - self.ground_margin - self.player_size
    }

    /// Player y when resting on the ceiling
    pub fn ceil_y(&self) -> f32 {
        self.ceil_margin
    }

    /// Vertical midline of the track
    pub fn midline(&self) -> f32 {
        self.track_height / 2.0
    }

    /// Load overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning overrides: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native builds always use the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.floor_y(), 318.0);
        assert_eq!(tuning.ceil_y(), 40.0);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.base_speed, 7.5);
        assert_eq!(tuning.spawn_interval_start, 1000.0);
        assert_eq!(tuning.track_width, 800.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_track_that_breaks_midline() {
        let err = Tuning::from_json(r#"{ "track_height": 200 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TrackTooShort { .. }));
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval_floor": 1200 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedInterval { .. }));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = Tuning::from_json(r#"{ "base_speed": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid("base_speed")));
    }
}
