//! Static obstacles
//!
//! Map edges and level geometry are a fixed list of rectangles. Movement is
//! validated by testing the would-be hitbox against all of them.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Impassable regions for a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleMap {
    rects: Vec<Rect>,
}

impl ObstacleMap {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// True if `candidate` overlaps (or touches) any obstacle
    pub fn would_collide(&self, candidate: &Rect) -> bool {
        self.rects.iter().any(|r| r.overlaps(candidate))
    }
}
