//! Frame timing
//!
//! Turns host frame timestamps into clamped per-frame deltas.

/// Computes elapsed milliseconds between successive frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    /// Largest delta handed to the simulation (ms)
    max_frame_ms: f64,
}

impl FrameClock {
    pub fn new(max_frame_ms: f64) -> Self {
        Self {
            last: None,
            max_frame_ms,
        }
    }

    /// Record a frame timestamp (ms) and return the delta since the previous one.
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields 0.
    /// Backwards timestamps yield 0; long stalls (tab backgrounding) are
    /// clamped to `max_frame_ms`. A non-finite timestamp yields 0 and is
    /// not remembered.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        if !timestamp.is_finite() {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) => (timestamp - last).clamp(0.0, self.max_frame_ms),
            None => 0.0,
        };
        self.last = Some(timestamp);
        dt
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last = None;
    }
}
