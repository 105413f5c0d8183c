//! Axis-aligned rectangles and the bearing test
//!
//! Everything in the map is a square or rectangle in screen space: +x right,
//! +y down, positions are top-left corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BEARING_LEG;
use crate::heading_vector;

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` with its top-left corner at `pos`
    #[inline]
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same rectangle moved by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Overlap test with inclusive edges: rectangles that only touch count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Point containment, half-open: left/top edges inside, right/bottom outside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Distance and bearing of an observer as seen from an oriented target.
///
/// Both actors are reduced to their centers. The bearing is the angle at the
/// target `C` between its facing direction and the direction to the observer
/// `A`, found with the law of cosines on a triangle whose third point `B` sits
/// `BEARING_LEG` units ahead of the target:
///
/// `angle = acos((|BC|² + |AC|² - |AB|²) / (2·|BC|·|AC|))`
///
/// Returns `(distance, angle_degrees)` with the angle in [0, 180]. An observer
/// exactly on the target has bearing 0.
pub fn distance_and_bearing(observer: Vec2, target: Vec2, target_rotation: f32) -> (f32, f32) {
    let distance_ac = observer.distance(target);
    if distance_ac == 0.0 {
        return (0.0, 0.0);
    }

    let b = target + heading_vector(target_rotation) * BEARING_LEG;
    let distance_ab = observer.distance(b);

    let cos = (BEARING_LEG * BEARING_LEG + distance_ac * distance_ac - distance_ab * distance_ab)
        / (2.0 * BEARING_LEG * distance_ac);
    // Rounding can push the ratio a hair past ±1
    let angle = cos.clamp(-1.0, 1.0).acos().to_degrees();

    (distance_ac, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_edge_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x = 10 edge
        assert!(a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shares only the corner
        assert!(a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        // Gap of a fraction of a unit
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -5.5, 10.0, 5.0)));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(10.0, 20.0, 35.0, 35.0);
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(r.contains_point(Vec2::new(44.9, 54.9)));
        assert!(!r.contains_point(Vec2::new(45.0, 30.0)));
        assert!(!r.contains_point(Vec2::new(30.0, 55.0)));
    }

    #[test]
    fn test_bearing_facing_observer() {
        // Target faces up (rotation 0); observer 100 units above it
        let target = Vec2::new(500.0, 500.0);
        let (distance, angle) = distance_and_bearing(Vec2::new(500.0, 400.0), target, 0.0);
        assert!((distance - 100.0).abs() < 0.001);
        assert!(angle.abs() < 0.5);
    }

    #[test]
    fn test_bearing_behind_and_beside() {
        let target = Vec2::new(0.0, 0.0);
        // Facing west (90), observer east
        let (_, behind) = distance_and_bearing(Vec2::new(60.0, 0.0), target, 90.0);
        assert!((behind - 180.0).abs() < 0.5);
        // Facing up, observer straight to the right
        let (_, beside) = distance_and_bearing(Vec2::new(60.0, 0.0), target, 0.0);
        assert!((beside - 90.0).abs() < 0.5);
    }

    #[test]
    fn test_bearing_zero_distance() {
        let p = Vec2::new(12.0, 34.0);
        let (distance, angle) = distance_and_bearing(p, p, 45.0);
        assert_eq!(distance, 0.0);
        assert_eq!(angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_bearing_in_range(
            ox in -1000.0f32..1000.0, oy in -1000.0f32..1000.0,
            tx in -1000.0f32..1000.0, ty in -1000.0f32..1000.0,
            rot in -720.0f32..720.0,
        ) {
            let (distance, angle) = distance_and_bearing(Vec2::new(ox, oy), Vec2::new(tx, ty), rot);
            prop_assert!(distance >= 0.0);
            prop_assert!(!angle.is_nan());
            prop_assert!((0.0..=180.0).contains(&angle));
        }

        #[test]
        fn prop_zero_distance_bearing(
            x in -1000.0f32..1000.0, y in -1000.0f32..1000.0,
            rot in -720.0f32..720.0,
        ) {
            let p = Vec2::new(x, y);
            prop_assert_eq!(distance_and_bearing(p, p, rot), (0.0, 0.0));
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
