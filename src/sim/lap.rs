//! Lap detection with a two-threshold latch
//!
//! A naive "progress crossed zero" check fires zero or multiple times per
//! revolution under variable frame timing. Instead the tracker arms once
//! progress has passed the midpoint, and emits a lap only when progress falls
//! from above the high threshold to below the low threshold in a single tick
//! while armed. One event per revolution, independent of tick rate.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Latched wraparound detector and lap counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapTracker {
    lap_count: u32,
    armed: bool,
    prev_progress: f32,
}

impl Default for LapTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LapTracker {
    pub fn new() -> Self {
        Self {
            lap_count: 0,
            // Disarmed until the player has actually been out on the lap;
            // jitter around the start line can never fire a lap.
            armed: false,
            prev_progress: 0.0,
        }
    }

    pub fn lap_count(&self) -> u32 {
        self.lap_count
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed this tick's progress; returns `true` exactly when a lap completed.
    ///
    /// Evaluated every tick after the player kinematics update. The caller is
    /// responsible for clamping `dt` so a single tick cannot jump most of a
    /// revolution (see the crate-level contract).
    pub fn observe(&mut self, progress: f32, tuning: &Tuning) -> bool {
        let lapped = self.armed
            && self.prev_progress > tuning.lap_high_threshold
            && progress < tuning.lap_low_threshold;

        if lapped {
            self.lap_count += 1;
            self.armed = false;
        }
        if progress > tuning.lap_arm_threshold {
            self.armed = true;
        }
        self.prev_progress = progress;
        lapped
    }
}
