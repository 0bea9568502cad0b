//! Run state and the core's outward-facing data
//!
//! `RunState` owns every piece of simulation state exclusively: the immutable
//! track, the player, the hazard set, the lap latch, and the theme selection.
//! Collaborators (renderer, HUD, audio) only ever see value snapshots and
//! events produced here — the core holds no handles into their worlds.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::hazard::{HazardField, HazardKind};
use super::lap::LapTracker;
use super::player::Player;
use super::theme::ThemeRegistry;
use super::track::Track;
use crate::tuning::Tuning;

/// Default course shape when the host doesn't supply its own track.
const DEFAULT_CONTROL_POINTS: usize = 64;
const DEFAULT_COURSE_RADIUS: f32 = 60.0;

/// Distance score gained per second.
const SCORE_RATE: f32 = 10.0;
/// Score per "FASTER!" milestone level.
const SCORE_PER_LEVEL: f32 = 100.0;

/// Whether the run is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    Running,
    /// Hit a hazard; the state is frozen until the host starts a new run.
    Crashed,
}

/// Discrete notifications for the audio/HUD collaborators. Fire-and-forget;
/// nothing feeds back into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    JumpStarted,
    LapCompleted { lap: u32 },
    Milestone { level: u32 },
    Crashed,
}

/// Player pose handed to the renderer each tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerPose {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Hazard pose plus type tag; the renderer owns all visual representation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HazardPose {
    pub kind: HazardKind,
    pub position: Vec3,
    pub orientation: Quat,
}

/// Read-only HUD snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HudSnapshot {
    pub progress: f32,
    pub speed: f32,
    pub lap_count: u32,
    pub score: f32,
    pub theme: &'static str,
}

/// Complete simulation state for one run.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed, kept for reproduction.
    pub seed: u64,
    pub rng: Pcg32,
    /// Immutable once built; player and hazards share it read-only.
    pub track: Track,
    pub player: Player,
    pub hazards: HazardField,
    pub laps: LapTracker,
    pub themes: ThemeRegistry,
    pub phase: RunPhase,
    /// Simulation tick counter (collider freshness stamp).
    pub time_ticks: u64,
    /// Accumulated wall-clock seconds, drives cosmetic oscillations.
    pub elapsed: f32,
    pub score: f32,
    /// Milestone level, `floor(score / 100)`.
    pub level: u32,
}

impl RunState {
    /// New run on the default winding loop course.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self::with_track(
            seed,
            Track::winding_loop(DEFAULT_CONTROL_POINTS, DEFAULT_COURSE_RADIUS),
            tuning,
        )
    }

    /// New run on a host-supplied track.
    pub fn with_track(seed: u64, track: Track, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut hazards = HazardField::new();
        hazards.spawn(&track, &mut rng, tuning, tuning.hazard_base);

        Self {
            seed,
            rng,
            track,
            player: Player::new(tuning),
            hazards,
            laps: LapTracker::new(),
            themes: ThemeRegistry::new(),
            phase: RunPhase::Running,
            time_ticks: 0,
            elapsed: 0.0,
            score: 0.0,
            level: 0,
        }
    }

    /// Accrue distance score; returns a newly reached milestone level, if any.
    pub(crate) fn accrue_score(&mut self, dt: f32) -> Option<u32> {
        self.score += dt * SCORE_RATE;
        let level = (self.score / SCORE_PER_LEVEL) as u32;
        if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            progress: self.player.progress,
            speed: self.player.speed,
            lap_count: self.laps.lap_count(),
            score: self.score,
            theme: self.themes.current().display_name,
        }
    }

    pub fn player_pose(&self, tuning: &Tuning) -> PlayerPose {
        let (position, orientation) = self.player.world_pose(&self.track, tuning);
        PlayerPose {
            position,
            orientation,
        }
    }

    /// Poses for every live hazard, oriented base-down against the wall with
    /// the cosmetic spin applied around the local up axis.
    pub fn hazard_poses(&self) -> Vec<HazardPose> {
        self.hazards
            .iter()
            .map(|h| {
                let seat = Quat::from_rotation_arc(Vec3::Y, -h.surface_normal);
                HazardPose {
                    kind: h.kind,
                    position: h.world_position,
                    orientation: seat * Quat::from_rotation_y(h.spin),
                }
            })
            .collect()
    }
}
