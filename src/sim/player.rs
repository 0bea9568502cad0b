//! Player kinematics on the tube wall
//!
//! The player is described entirely in track-relative terms: progress along
//! the loop, angle around the cross-section, and height above the wall while
//! jumping. The world pose is derived on demand from the shared track.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::track::Track;
use crate::tuning::Tuning;
use crate::wrap_progress;

/// Collision proxy half-extents: a tight core box, deliberately smaller than
/// the visual character and never rotated, so the hitbox footprint is
/// constant no matter which way the runner faces.
const PLAYER_BOX_HALF_EXTENTS: Vec3 = Vec3::new(0.2, 0.175, 0.4);

/// Abstract per-tick input snapshot. The host owns device capture; the core
/// only ever sees these four booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub jump: bool,
}

/// Track-relative player state.
///
/// `speed` is a plain field on purpose: the progression layer bumps it on lap
/// completion and applies continuous acceleration between ticks, and the
/// kinematics must tolerate that external mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Normalized position along the track, always in `[0,1)`.
    pub progress: f32,
    /// Position around the tube cross-section, radians, unbounded.
    pub angle: f32,
    /// Forward speed in speed units (converted to progress by the tuning's
    /// `progress_scale`).
    pub speed: f32,
    /// Height above the tube wall; zero while grounded, never negative.
    pub jump_height: f32,
    pub jump_velocity: f32,
    pub is_jumping: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            progress: 0.0,
            // Start at the bottom of the tube
            angle: -std::f32::consts::FRAC_PI_2,
            speed: tuning.start_speed,
            jump_height: 0.0,
            jump_velocity: 0.0,
            is_jumping: false,
        }
    }

    /// Advance one tick. Returns `true` if a jump started this tick (the
    /// host's audio collaborator wants the discrete event, not the state).
    ///
    /// `dt` must be pre-clamped by the caller: a multi-revolution progress
    /// jump in one tick would outrun the lap latch's tolerance.
    pub fn advance(&mut self, input: &InputState, tuning: &Tuning, dt: f32) -> bool {
        let effective_speed = if input.boost {
            self.speed * tuning.boost_multiplier
        } else {
            self.speed
        };
        self.progress =
            wrap_progress(self.progress + effective_speed * dt * tuning.progress_scale);

        if input.right {
            self.angle += tuning.turn_rate * dt;
        }
        if input.left {
            self.angle -= tuning.turn_rate * dt;
        }

        let mut jump_started = false;
        if input.jump && !self.is_jumping {
            self.is_jumping = true;
            self.jump_velocity = tuning.launch_velocity;
            jump_started = true;
        }

        if self.is_jumping {
            self.jump_velocity += tuning.gravity * dt;
            self.jump_height += self.jump_velocity * dt;
            if self.jump_height <= 0.0 {
                self.jump_height = 0.0;
                self.jump_velocity = 0.0;
                self.is_jumping = false;
            }
        }

        jump_started
    }

    /// Derive the world position and orientation from track-relative state.
    ///
    /// The runner is on the inside surface of the tube, so "up" points toward
    /// the tube's axis (`-surface_normal`) and forward follows the tangent.
    /// Local axes: `+Y` up, `+Z` forward.
    pub fn world_pose(&self, track: &Track, tuning: &Tuning) -> (Vec3, Quat) {
        let surface_normal = track.surface_normal_at(self.progress, self.angle);
        let position = track.point_at(self.progress)
            + surface_normal
                * (tuning.tube_radius - tuning.player_half_height - self.jump_height);

        let up = -surface_normal;
        let forward = track.tangent_at(self.progress);
        let right = up.cross(forward).normalize();
        let orientation = Quat::from_mat3(&Mat3::from_cols(right, up, forward));

        (position, orientation)
    }

    /// Axis-aligned collision box centered on the world position.
    pub fn collision_box(&self, track: &Track, tuning: &Tuning) -> Aabb {
        let (position, _) = self.world_pose(track, tuning);
        Aabb::from_center_half_extents(position, PLAYER_BOX_HALF_EXTENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jump_input() -> InputState {
        InputState {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_stays_in_unit_range() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.speed = 50.0;
        for _ in 0..1000 {
            player.advance(&InputState::default(), &tuning, 0.016);
            assert!((0.0..1.0).contains(&player.progress));
        }
    }

    #[test]
    fn test_steering_integrates_turn_rate() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let start = player.angle;

        let right = InputState {
            right: true,
            ..Default::default()
        };
        player.advance(&right, &tuning, 0.5);
        assert!((player.angle - (start + tuning.turn_rate * 0.5)).abs() < 1e-5);

        let left = InputState {
            left: true,
            ..Default::default()
        };
        player.advance(&left, &tuning, 0.5);
        assert!((player.angle - start).abs() < 1e-5);
    }

    #[test]
    fn test_boost_multiplies_progress_rate() {
        let tuning = Tuning::default();
        let mut plain = Player::new(&tuning);
        let mut boosted = Player::new(&tuning);

        plain.advance(&InputState::default(), &tuning, 0.1);
        boosted.advance(
            &InputState {
                boost: true,
                ..Default::default()
            },
            &tuning,
            0.1,
        );
        assert!(
            (boosted.progress - plain.progress * tuning.boost_multiplier).abs() < 1e-6
        );
    }

    #[test]
    fn test_jump_peak_matches_closed_form() {
        // gravity -20, launch 8: peak 1.6 at t = 0.4s
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        player.advance(&jump_input(), &tuning, 0.001);
        assert!(player.is_jumping);

        let steps = (0.4 / 0.001) as usize - 1;
        for _ in 0..steps {
            player.advance(&InputState::default(), &tuning, 0.001);
        }
        assert!((player.jump_height - 1.6).abs() < 0.02);
    }

    #[test]
    fn test_jump_time_aloft_matches_closed_form() {
        // time aloft = 2 * 8 / 20 = 0.8s
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.advance(&jump_input(), &tuning, 0.001);

        let mut elapsed: f32 = 0.001;
        while player.is_jumping {
            assert!(player.jump_height >= 0.0);
            player.advance(&InputState::default(), &tuning, 0.001);
            elapsed += 0.001;
            assert!(elapsed < 1.0, "jump never landed");
        }
        assert!((elapsed - 0.8).abs() < 0.01);
        assert_eq!(player.jump_height, 0.0);
        assert_eq!(player.jump_velocity, 0.0);
    }

    #[test]
    fn test_jump_height_never_negative_under_irregular_dt() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.advance(&jump_input(), &tuning, 0.003);

        // Uneven step sequence, including a large one past the landing time
        for dt in [0.001, 0.016, 0.05, 0.2, 0.4, 0.3] {
            player.advance(&InputState::default(), &tuning, dt);
            assert!(player.jump_height >= 0.0);
        }
        assert!(!player.is_jumping);
    }

    #[test]
    fn test_held_jump_does_not_relaunch_mid_air() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.advance(&jump_input(), &tuning, 0.01));
        // Held jump while airborne never reports another start
        for _ in 0..20 {
            assert!(!player.advance(&jump_input(), &tuning, 0.01));
        }
    }

    #[test]
    fn test_external_speed_mutation_between_ticks() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.advance(&jump_input(), &tuning, 0.01);
        let height_before = player.jump_height;

        // Progression layer bumps speed mid-jump; kinematics must not corrupt
        player.speed += 10.0;
        player.advance(&InputState::default(), &tuning, 0.01);
        assert!(player.is_jumping);
        assert!(player.jump_height > height_before);
    }

    #[test]
    fn test_world_pose_sits_on_the_wall() {
        let tuning = Tuning::default();
        let track = Track::winding_loop(64, 60.0);
        let player = Player::new(&tuning);

        let (position, orientation) = player.world_pose(&track, &tuning);
        let centerline = track.point_at(player.progress);
        let expected = tuning.tube_radius - tuning.player_half_height;
        assert!(((position - centerline).length() - expected).abs() < 1e-3);

        // Head points toward the tube axis, forward follows the tangent
        let surface_normal = track.surface_normal_at(player.progress, player.angle);
        assert!((orientation * Vec3::Y + surface_normal).length() < 1e-3);
        assert!((orientation * Vec3::Z - track.tangent_at(player.progress)).length() < 1e-3);
    }

    #[test]
    fn test_jump_lifts_pose_off_the_wall() {
        let tuning = Tuning::default();
        let track = Track::winding_loop(64, 60.0);
        let mut player = Player::new(&tuning);
        player.advance(&jump_input(), &tuning, 0.1);

        let (position, _) = player.world_pose(&track, &tuning);
        let centerline = track.point_at(player.progress);
        let grounded = tuning.tube_radius - tuning.player_half_height;
        assert!((position - centerline).length() < grounded - 0.01);
    }
}
