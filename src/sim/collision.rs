//! Broad-phase collision detection
//!
//! Axis-aligned box overlap only: a deliberate fairness simplification.
//! Player and hazard boxes never rotate with their meshes, so the effective
//! footprint is constant regardless of orientation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::hazard::Hazard;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// True iff the boxes overlap on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Test the player's box against every hazard collider.
///
/// Linear scan, short-circuiting on the first hit; the result is
/// order-independent. O(n) per tick is fine at this scale (n < 100) — a
/// spatial partition would only pay for itself well beyond the hazard cap.
pub fn any_collision(player_box: &Aabb, hazards: &[Hazard]) -> bool {
    hazards.iter().any(|h| player_box.intersects(&h.collider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::HazardKind;

    fn boxed(center: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, Vec3::splat(1.0))
    }

    #[test]
    fn test_overlap_on_all_axes() {
        let a = boxed(Vec3::ZERO);
        let b = boxed(Vec3::new(1.5, 1.5, 1.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separation_on_any_single_axis_is_a_miss() {
        let a = boxed(Vec3::ZERO);
        // Overlapping on two axes but separated on the third
        assert!(!a.intersects(&boxed(Vec3::new(3.0, 0.5, 0.5))));
        assert!(!a.intersects(&boxed(Vec3::new(0.5, 3.0, 0.5))));
        assert!(!a.intersects(&boxed(Vec3::new(0.5, 0.5, 3.0))));
    }

    #[test]
    fn test_touching_faces_count_as_overlap() {
        let a = boxed(Vec3::ZERO);
        let b = boxed(Vec3::new(2.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_any_collision_scans_all_hazards() {
        let far = Hazard::at(HazardKind::Spike, Vec3::new(100.0, 0.0, 0.0));
        let near = Hazard::at(HazardKind::Blocking, Vec3::new(0.5, 0.0, 0.0));
        let player = boxed(Vec3::ZERO);

        assert!(!any_collision(&player, &[far.clone()]));
        assert!(any_collision(&player, &[far.clone(), near.clone()]));
        // Order-independent
        assert!(any_collision(&player, &[near, far]));
    }

    #[test]
    fn test_any_collision_empty_set() {
        assert!(!any_collision(&boxed(Vec3::ZERO), &[]));
    }
}
