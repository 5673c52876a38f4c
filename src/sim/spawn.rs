//! Obstacle spawning
//!
//! Seeded so a run can be reproduced from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Attachment, Obstacle, RunCounters};
use crate::tuning::Tuning;

/// Random source for obstacle placement
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick an attachment edge, 50/50
    pub fn roll_attachment(&mut self) -> Attachment {
        if self.rng.random_bool(0.5) {
            Attachment::Floor
        } else {
            Attachment::Ceiling
        }
    }

    /// Advance the spawn timer by `dt` ms and spawn at most one obstacle.
    ///
    /// On spawn the timer restarts at zero and the interval shrinks by one
    /// step, never below the floor.
    pub fn advance(
        &mut self,
        counters: &mut RunCounters,
        tuning: &Tuning,
        dt: f64,
    ) -> Option<Obstacle> {
        counters.spawn_timer += dt;
        if counters.spawn_timer < counters.spawn_interval {
            return None;
        }

        counters.spawn_timer = 0.0;
        let obstacle = Obstacle::spawn(self.roll_attachment(), tuning);
        counters.spawn_interval = (counters.spawn_interval - tuning.spawn_interval_step)
            .max(tuning.spawn_interval_floor);
        Some(obstacle)
    }
}
