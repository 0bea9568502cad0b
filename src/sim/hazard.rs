//! Hazard placement, spawning, and difficulty scaling
//!
//! Hazards are data-only records: origin on the track, current world position,
//! and an axis-aligned collider. The whole set is replaced on every difficulty
//! transition — nothing reconciles against previous entities, so correctness
//! never depends on identity across laps.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::track::Track;
use crate::tuning::Tuning;

/// Hazards start this far into the lap; the lap start stays clear.
const SPAWN_START: f32 = 0.1;

/// Hover oscillation for Blocking hazards (along the surface normal).
const HOVER_RATE: f32 = 2.0;
const HOVER_AMPLITUDE: f32 = 0.5;

/// Cosmetic spin rates (radians per second).
const SPIKE_SPIN_RATE: f32 = 2.0;
const BLOCKING_SPIN_RATE: f32 = 0.5;

/// Hazard flavor. Both kill on contact; they differ in shape and animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Crate-like slab that hovers along its surface normal.
    Blocking,
    /// Cone that spins in place.
    Spike,
}

impl HazardKind {
    /// Fixed collider half-extents per kind (never rotated).
    pub fn half_extents(&self) -> Vec3 {
        match self {
            HazardKind::Blocking => Vec3::new(2.0, 2.5, 0.5),
            HazardKind::Spike => Vec3::new(0.9, 1.8, 0.9),
        }
    }
}

/// A single hazard on the tube wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    /// Track progress where the hazard was placed.
    pub origin_progress: f32,
    /// Cross-section angle where the hazard was placed.
    pub origin_angle: f32,
    /// Placement position on the tube wall (hover oscillates around this).
    pub origin_position: Vec3,
    /// Outward spoke direction at the placement point.
    pub surface_normal: Vec3,
    /// Current position, moved by the hover animation for Blocking hazards.
    pub world_position: Vec3,
    /// Collider recomputed from `world_position` every animation pass.
    pub collider: Aabb,
    /// Random offset so hazards don't oscillate in sync. Cosmetic only.
    pub animation_phase: f32,
    /// Accumulated cosmetic spin about the hazard's own axis.
    pub spin: f32,
}

impl Hazard {
    /// Build a hazard directly at a world position (test scaffolding and
    /// host-driven scripted placements).
    pub fn at(kind: HazardKind, position: Vec3) -> Self {
        Self {
            kind,
            origin_progress: 0.0,
            origin_angle: 0.0,
            origin_position: position,
            surface_normal: Vec3::Y,
            world_position: position,
            collider: Aabb::from_center_half_extents(position, kind.half_extents()),
            animation_phase: 0.0,
            spin: 0.0,
        }
    }
}

/// The full hazard set for the current lap.
#[derive(Debug, Clone, Default)]
pub struct HazardField {
    hazards: Vec<Hazard>,
    /// Tick at which colliders were last refreshed. Collision queries assert
    /// against this; testing a stale box is a contract violation, not a
    /// recoverable error.
    colliders_tick: u64,
}

impl HazardField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }

    /// Add a single hazard (scripted placements, test scaffolding).
    pub fn push(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    /// Colliders for this tick's collision pass.
    ///
    /// Panics in debug builds if [`HazardField::animate`] has not refreshed
    /// the boxes this tick — hover moves Blocking hazards, so a stale box is
    /// a correctness bug.
    pub fn colliders(&self, tick: u64) -> &[Hazard] {
        debug_assert_eq!(
            self.colliders_tick, tick,
            "hazard colliders not refreshed this tick (stale bounding boxes)"
        );
        &self.hazards
    }

    /// Replace the hazard set with `count` fresh hazards spread along the lap.
    ///
    /// Placement `t` runs from 10% into the lap to just short of the start;
    /// cross-section angle and kind are drawn from the injected RNG so runs
    /// are reproducible per seed.
    pub fn spawn(&mut self, track: &Track, rng: &mut Pcg32, tuning: &Tuning, count: u32) {
        self.hazards.clear();
        self.hazards.reserve(count as usize);

        for i in 0..count {
            let t = SPAWN_START + (i as f32 / count as f32) * (1.0 - SPAWN_START);
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let kind = if rng.random::<bool>() {
                HazardKind::Blocking
            } else {
                HazardKind::Spike
            };
            let animation_phase = rng.random_range(0.0..100.0f32);

            let surface_normal = track.surface_normal_at(t, angle);
            let position = track.radial_point(t, angle, tuning.tube_radius);

            self.hazards.push(Hazard {
                kind,
                origin_progress: t,
                origin_angle: angle,
                origin_position: position,
                surface_normal,
                world_position: position,
                collider: Aabb::from_center_half_extents(position, kind.half_extents()),
                animation_phase,
                spin: 0.0,
            });
        }
    }

    /// Discard the current set and respawn at the density for `lap`.
    ///
    /// `count = min(capacity, base + per_lap * lap)` — density grows with
    /// each lap but is hard-capped regardless of lap number.
    pub fn regenerate(&mut self, track: &Track, rng: &mut Pcg32, tuning: &Tuning, lap: u32) {
        let count = tuning
            .hazard_capacity
            .min(tuning.hazard_base + tuning.hazard_per_lap * lap);
        log::info!("lap {lap}: regenerating {count} hazards");
        self.spawn(track, rng, tuning, count);
    }

    /// Per-tick cosmetic animation, driven by wall-clock `time`.
    ///
    /// Blocking hazards hover along their surface normal, which moves the
    /// position used for collision — so the collider is rebuilt here, in the
    /// same pass, before any collision query this tick. Spikes only spin;
    /// their boxes stay put but are restamped as fresh.
    pub fn animate(&mut self, time: f32, dt: f32, tick: u64) {
        for hazard in &mut self.hazards {
            match hazard.kind {
                HazardKind::Blocking => {
                    let hover =
                        (time * HOVER_RATE + hazard.animation_phase).sin() * HOVER_AMPLITUDE;
                    hazard.world_position =
                        hazard.origin_position + hazard.surface_normal * hover;
                    hazard.spin += BLOCKING_SPIN_RATE * dt;
                }
                HazardKind::Spike => {
                    hazard.spin += SPIKE_SPIN_RATE * dt;
                }
            }
            hazard.collider = Aabb::from_center_half_extents(
                hazard.world_position,
                hazard.kind.half_extents(),
            );
        }
        self.colliders_tick = tick;
    }
}
