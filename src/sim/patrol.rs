//! Walking guard patrols
//!
//! A walking guard turns until it faces its patrol heading, then steps along
//! the patrol axis. Arriving at an endpoint flips the heading, which sends it
//! back into the turn. Arrival only counts after the guard has been more than
//! `PATROL_LEAVE_DISTANCE` away from both endpoints, since its hitbox sits on
//! top of an endpoint for many ticks.
//!
//! While turning, the guard's `speed` doubles as its turn rate in degrees.
//! Patrol routes are not checked against obstacles.

use super::state::{AnimationPose, Guard, GuardKind};
use super::timing::walk_cycle_pose;
use crate::consts::PATROL_LEAVE_DISTANCE;
use crate::normalize_degrees;
use crate::settings::Settings;

/// Advance one guard by a tick. Returns true if it turned back at an endpoint.
pub fn advance_guard(guard: &mut Guard, now_ms: u64, settings: &Settings) -> bool {
    // Grabbed guards freeze where they stand
    if guard.killed_at_ms.is_some() {
        return false;
    }
    let GuardKind::Walking(patrol) = &mut guard.kind else {
        return false;
    };
    let actor = &mut guard.actor;

    let target = patrol.heading.degrees();
    let current = normalize_degrees(actor.rotation);
    if current != target {
        // Turn counter-clockwise; land exactly on the heading rather than overshoot
        let remaining = normalize_degrees(target - current);
        actor.rotation = if remaining <= actor.speed {
            target
        } else {
            normalize_degrees(current + actor.speed)
        };
    } else {
        let walk_start = *actor.walk_start_ms.get_or_insert(now_ms);
        actor.pose = walk_cycle_pose(
            now_ms.saturating_sub(walk_start),
            actor.speed,
            settings.walk_cycle_base_ms,
        );
        if actor.throttle.try_consume(now_ms) {
            actor.pos += patrol.heading.step() * actor.speed;
        }
    }

    let mut reversed = false;
    let rect = actor.rect();
    if !patrol.at_start
        && !patrol.at_targets
        && (rect.contains_point(patrol.start) || rect.contains_point(patrol.end))
    {
        patrol.heading = patrol.heading.reversed();
        patrol.at_targets = true;
        actor.walk_start_ms = None;
        actor.pose = AnimationPose::Standing;
        reversed = true;
        log::debug!(
            "{} reached ({:.0}, {:.0}) on its {:?} patrol, turning {}",
            guard.name,
            actor.pos.x,
            actor.pos.y,
            patrol.axis,
            patrol.heading
        );
    }

    if actor.pos.distance(patrol.start) > PATROL_LEAVE_DISTANCE
        && actor.pos.distance(patrol.end) > PATROL_LEAVE_DISTANCE
    {
        patrol.at_targets = false;
        patrol.at_start = false;
    }

    reversed
}
