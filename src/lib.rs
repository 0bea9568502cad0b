//! Tube Rush - an endless loop-track runner core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track geometry, kinematics, hazards,
//!   collisions, lap progression)
//! - `tuning`: Data-driven game balance
//!
//! The crate is a library consumed by a host frame loop. It owns no rendering,
//! audio, or input-device handles: the host feeds it an [`sim::InputState`]
//! snapshot and a pre-clamped `dt` each frame, and reads back poses, events,
//! and a HUD snapshot.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::{Quat, Vec3};

/// Wrap a track-progress value into `[0, 1)`.
///
/// `1.0` and `0.0` are the same location on the closed track, so any
/// increment (or decrement) maps back into the canonical range.
#[inline]
pub fn wrap_progress(progress: f32) -> f32 {
    let wrapped = progress.rem_euclid(1.0);
    // rem_euclid(1.0) rounds up to exactly 1.0 for inputs like -1e-8
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Rotate `v` about unit `axis` by `angle` radians (right-hand rule).
#[inline]
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    Quat::from_axis_angle(axis, angle) * v
}
