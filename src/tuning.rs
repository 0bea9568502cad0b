//! Data-driven game balance
//!
//! Every gameplay constant lives here so the host can inject overrides
//! (difficulty presets, test fixtures) instead of recompiling. Values are the
//! shipped reference tuning; partial JSON overrides fall back to defaults
//! field by field.

use serde::{Deserialize, Serialize};

/// Injected tuning constants for the whole simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tube cross-section radius (world units).
    pub tube_radius: f32,
    /// Half the player's height; keeps the feet on the wall, not the center.
    pub player_half_height: f32,
    /// Initial forward speed.
    pub start_speed: f32,
    /// Upward velocity applied at the start of a jump.
    pub launch_velocity: f32,
    /// Gravity for the jump integrator (negative, pulls back to the wall).
    pub gravity: f32,
    /// Steering rate around the cross-section (radians per second).
    pub turn_rate: f32,
    /// Converts speed units to progress-per-second along the track.
    pub progress_scale: f32,
    /// Forward speed multiplier while boost is held.
    pub boost_multiplier: f32,
    /// Continuous acceleration (speed units per second per second).
    pub acceleration: f32,
    /// Extra acceleration amplitude for the Bloodstream beat oscillation.
    pub beat_acceleration: f32,
    /// Flat speed increase on each completed lap.
    pub speed_bump: f32,

    /// Hard cap on hazards per lap, regardless of lap number.
    pub hazard_capacity: u32,
    /// Hazard count on the first lap.
    pub hazard_base: u32,
    /// Additional hazards per completed lap.
    pub hazard_per_lap: u32,

    /// Progress above which the lap latch re-arms.
    pub lap_arm_threshold: f32,
    /// Previous-tick progress must exceed this for a wrap to count.
    pub lap_high_threshold: f32,
    /// Current-tick progress must fall below this for a wrap to count.
    pub lap_low_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tube_radius: 4.0,
            player_half_height: 0.5,
            start_speed: 0.15,
            launch_velocity: 8.0,
            gravity: -20.0,
            turn_rate: 4.0,
            progress_scale: 0.05,
            boost_multiplier: 3.0,
            acceleration: 0.0005,
            beat_acceleration: 0.0001,
            speed_bump: 0.01,

            hazard_capacity: 60,
            hazard_base: 30,
            hazard_per_lap: 2,

            lap_arm_threshold: 0.5,
            lap_high_threshold: 0.8,
            lap_low_threshold: 0.2,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
