//! Wall-clock gating for movement and walk animation
//!
//! Position steps are throttled independently of the frame rate, which gives
//! characters a deliberate stutter-step; the walk cycle runs off elapsed time.

use serde::{Deserialize, Serialize};

use super::state::AnimationPose;

/// Minimum interval between accepted position steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepThrottle {
    /// Time of the last accepted step (None = never stepped, always due)
    pub last_step_ms: Option<u64>,
    /// A step is due once strictly more than this has elapsed
    pub interval_ms: f32,
}

impl StepThrottle {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            last_step_ms: None,
            interval_ms,
        }
    }

    /// Whether a step may be taken at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_step_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f32 > self.interval_ms,
        }
    }

    /// Record an accepted step
    pub fn mark(&mut self, now_ms: u64) {
        self.last_step_ms = Some(now_ms);
    }

    /// `is_due` + `mark` in one go, for movers that never get blocked
    pub fn try_consume(&mut self, now_ms: u64) -> bool {
        if self.is_due(now_ms) {
            self.mark(now_ms);
            true
        } else {
            false
        }
    }
}

/// Pose for a walk that started `elapsed_ms` ago.
///
/// Each pose lasts `base_ms / speed`; the cycle is right foot, stand, left
/// foot, stand.
pub fn walk_cycle_pose(elapsed_ms: u64, speed: f32, base_ms: f32) -> AnimationPose {
    let phase_len = base_ms / speed;
    let phase = (elapsed_ms as f32 / phase_len) as u64 % 4;
    match phase {
        0 => AnimationPose::RightFoot,
        2 => AnimationPose::LeftFoot,
        _ => AnimationPose::Standing,
    }
}
