//! Closed track geometry and the perpendicular placement frame
//!
//! The track is a closed uniform Catmull-Rom spline over an ordered loop of
//! control points, queried by normalized progress `t ∈ [0,1)` with `t=1 ≡ t=0`.
//! Built once at world init and immutable afterwards; every other component
//! holds a shared read-only reference so player and hazards derive identical
//! frames from identical math.

use glam::Vec3;

use crate::{rotate_about_axis, wrap_progress};

/// Above this |tangent · up| the fixed up reference is nearly parallel to the
/// tangent and the cross product degenerates, so we swap to a lateral axis.
const REF_SWAP_THRESHOLD: f32 = 0.9;

/// Errors from track construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// A Catmull-Rom segment needs four control points.
    TooFewPoints(usize),
    /// Control point at this index contains a NaN or infinity.
    NonFinitePoint(usize),
}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackError::TooFewPoints(n) => {
                write!(f, "closed spline needs at least 4 control points, got {n}")
            }
            TrackError::NonFinitePoint(i) => {
                write!(f, "control point {i} is not finite")
            }
        }
    }
}

impl std::error::Error for TrackError {}

/// Orthonormal basis at a point on the track.
///
/// Recomputed on every query from the fixed reference axis; never cached or
/// transported along the curve, so small `t` changes give nearby frames.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Unit vector along the direction of travel.
    pub tangent: Vec3,
    /// Unit vector perpendicular to the tangent, angle-zero spoke of the tube.
    pub normal: Vec3,
    /// `tangent × normal`, completing the right-handed basis.
    pub binormal: Vec3,
}

/// A closed parametric path through 3D space.
#[derive(Debug, Clone)]
pub struct Track {
    points: Vec<Vec3>,
}

impl Track {
    /// Build a closed track from an ordered loop of control points.
    pub fn new(points: Vec<Vec3>) -> Result<Self, TrackError> {
        if points.len() < 4 {
            return Err(TrackError::TooFewPoints(points.len()));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::NonFinitePoint(i));
        }
        Ok(Self { points })
    }

    /// Generate the default winding loop course: a ring of `count` points of
    /// roughly `radius` extent, with lateral wobble and gentle vertical
    /// winding so the tangent never goes near vertical.
    pub fn winding_loop(count: usize, radius: f32) -> Self {
        assert!(count >= 4, "winding loop needs at least 4 control points");
        let points = (0..count)
            .map(|i| {
                let theta = i as f32 / count as f32 * std::f32::consts::TAU;
                let ring = radius + (theta * 2.0).sin() * radius * 0.1;
                Vec3::new(
                    theta.cos() * ring,
                    (theta * 3.0).sin() * radius * 0.15,
                    theta.sin() * ring,
                )
            })
            .collect();
        Self { points }
    }

    /// Number of control points (= number of spline segments, closed).
    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    /// Wrap `t` into `[0,1)` and split into (segment index, local parameter).
    ///
    /// Non-finite `t` would poison every downstream position with NaN, so it
    /// is logged and remapped to the start of the track.
    fn locate(&self, t: f32) -> (usize, f32) {
        let t = if t.is_finite() {
            wrap_progress(t)
        } else {
            log::error!("non-finite track parameter {t}, clamping to 0");
            0.0
        };
        let n = self.points.len();
        let scaled = t * n as f32;
        let mut index = scaled as usize;
        // t just below 1.0 can scale to exactly n
        if index >= n {
            index = n - 1;
        }
        (index, scaled - index as f32)
    }

    fn segment_points(&self, index: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let n = self.points.len();
        (
            self.points[(index + n - 1) % n],
            self.points[index],
            self.points[(index + 1) % n],
            self.points[(index + 2) % n],
        )
    }

    /// Position on the track at progress `t` (defined for all real `t`).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (index, u) = self.locate(t);
        let (p0, p1, p2, p3) = self.segment_points(index);
        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * (2.0 * p1
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Unit tangent (direction of travel) at progress `t`.
    ///
    /// Analytic first derivative of the spline segment; callers must not
    /// assume second-derivative continuity across segment joins.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (index, u) = self.locate(t);
        let (p0, p1, p2, p3) = self.segment_points(index);
        let u2 = u * u;
        let derivative = 0.5
            * ((p2 - p0)
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * (2.0 * u)
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * (3.0 * u2));
        derivative.try_normalize().unwrap_or(Vec3::Z)
    }

    /// Perpendicular frame at progress `t`.
    ///
    /// Deliberately not Frenet/parallel transport: a fixed world-up reference
    /// keeps the frame stable on a winding course (no flips at inflection
    /// points), swapping to a lateral reference only where the tangent is
    /// nearly vertical.
    pub fn frame_at(&self, t: f32) -> Frame {
        let tangent = self.tangent_at(t);
        let reference = if tangent.y.abs() > REF_SWAP_THRESHOLD {
            Vec3::X
        } else {
            Vec3::Y
        };
        let normal = tangent.cross(reference).normalize();
        let binormal = tangent.cross(normal).normalize();
        Frame {
            tangent,
            normal,
            binormal,
        }
    }

    /// The frame normal rotated `angle` radians about the tangent.
    ///
    /// This is the "spoke" direction from the tube's axis toward its wall at
    /// the given cross-section angle.
    pub fn surface_normal_at(&self, t: f32, angle: f32) -> Vec3 {
        let frame = self.frame_at(t);
        rotate_about_axis(frame.normal, frame.tangent, angle)
    }

    /// A point on the tube's cross-section circle: `angle` radians around the
    /// tangent at distance `radius` from the track centerline.
    ///
    /// Player placement and hazard placement both go through this function so
    /// their coordinate frames can never desync.
    pub fn radial_point(&self, t: f32, angle: f32, radius: f32) -> Vec3 {
        self.point_at(t) + self.surface_normal_at(t, angle) * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_track() -> Track {
        Track::winding_loop(64, 60.0)
    }

    #[test]
    fn test_new_rejects_too_few_points() {
        let err = Track::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap_err();
        assert_eq!(err, TrackError::TooFewPoints(3));
    }

    #[test]
    fn test_new_rejects_non_finite_points() {
        let err = Track::new(vec![Vec3::ZERO, Vec3::X, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::Y])
            .unwrap_err();
        assert_eq!(err, TrackError::NonFinitePoint(2));
    }

    #[test]
    fn test_track_is_closed() {
        let track = test_track();
        assert!((track.point_at(0.0) - track.point_at(1.0)).length() < 1e-4);
        assert!((track.point_at(0.25) - track.point_at(1.25)).length() < 1e-4);
        assert!((track.point_at(0.75) - track.point_at(-0.25)).length() < 1e-4);
    }

    #[test]
    fn test_tangent_is_unit_length() {
        let track = test_track();
        for i in 0..200 {
            let t = i as f32 / 200.0;
            let len = track.tangent_at(t).length();
            assert!((len - 1.0).abs() < 1e-4, "tangent length {len} at t={t}");
        }
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let track = test_track();
        for i in 0..100 {
            let t = i as f32 / 100.0;
            let f = track.frame_at(t);
            assert!(f.tangent.dot(f.normal).abs() < 1e-4);
            assert!(f.tangent.dot(f.binormal).abs() < 1e-4);
            assert!(f.normal.dot(f.binormal).abs() < 1e-4);
            assert!((f.normal.length() - 1.0).abs() < 1e-4);
            assert!((f.binormal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_frame_survives_near_vertical_tangent() {
        // A loop standing on its side in the Y-Z plane: the tangent passes
        // through vertical, exercising the reference-axis swap.
        let points = (0..16)
            .map(|i| {
                let theta = i as f32 / 16.0 * std::f32::consts::TAU;
                Vec3::new(0.0, theta.cos() * 30.0, theta.sin() * 30.0)
            })
            .collect();
        let track = Track::new(points).unwrap();
        for i in 0..100 {
            let t = i as f32 / 100.0;
            let f = track.frame_at(t);
            assert!(f.normal.is_finite() && f.normal.length() > 0.9);
            assert!(f.binormal.is_finite() && f.binormal.length() > 0.9);
        }
    }

    #[test]
    fn test_radial_point_distance_from_centerline() {
        let track = test_track();
        for i in 0..50 {
            let t = i as f32 / 50.0;
            let angle = i as f32 * 0.7;
            let p = track.radial_point(t, angle, 4.0);
            assert!(((p - track.point_at(t)).length() - 4.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_non_finite_parameter_yields_finite_pose() {
        let track = test_track();
        assert!(track.point_at(f32::NAN).is_finite());
        assert!(track.point_at(f32::INFINITY).is_finite());
        assert!(track.tangent_at(f32::NAN).is_finite());
        assert!(track.radial_point(f32::NEG_INFINITY, 1.0, 4.0).is_finite());
    }

    proptest! {
        #[test]
        fn prop_point_at_defined_for_all_t(t in -100.0f32..100.0) {
            let track = test_track();
            prop_assert!(track.point_at(t).is_finite());
        }

        #[test]
        fn prop_radial_point_periodic_in_angle(
            t in -2.0f32..2.0,
            angle in -10.0f32..10.0,
            radius in 0.5f32..8.0,
        ) {
            let track = test_track();
            let a = track.radial_point(t, angle, radius);
            let b = track.radial_point(t, angle + std::f32::consts::TAU, radius);
            prop_assert!((a - b).length() < 1e-3);
        }
    }
}
