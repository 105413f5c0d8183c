//! Hiding, takedowns and guard perception
//!
//! A guard sees something when it is strictly within `detection_radius` and
//! strictly inside the `view_half_angle_deg` cone around the guard's facing.
//! Guards notice the player (unless hiding) and any guard that has been taken
//! down. Every alert guard checks every other guard for a body, O(n²) in the
//! guard count; with the handful of guards on a map that is fine, and a
//! uniform grid with cells of at least `detection_radius` would give the same
//! answers if it ever is not.

use super::geometry::Rect;
use super::state::{AnimationPose, Bush, DetectionCause, GameEvent, Guard, Player};
use crate::settings::Settings;

/// Player hides while its hitbox touches the core of any bush
pub fn update_hiding(player: &mut Player, bushes: &[Bush]) {
    let rect = player.actor.rect();
    player.hiding = bushes.iter().any(|b| rect.overlaps(&b.core_rect()));
}

/// Distance and angle are both strictly inside the view cone
fn within_view(distance: f32, angle: f32, settings: &Settings) -> bool {
    distance < settings.detection_radius && angle < settings.view_half_angle_deg
}

/// Every alarm raised this tick, in guard order
pub fn scan_for_alerts(player: &Player, guards: &[Guard], settings: &Settings) -> Vec<GameEvent> {
    let mut alerts = Vec::new();

    for guard in guards.iter().filter(|g| g.is_alert()) {
        if !player.hiding {
            let (distance, angle) = guard.actor.bearing_of(&player.actor);
            if within_view(distance, angle, settings) {
                alerts.push(GameEvent::PlayerDetected {
                    guard: guard.id,
                    cause: DetectionCause::Player,
                });
            }
        }

        for body in guards.iter().filter(|h| h.id != guard.id && h.is_body()) {
            let (distance, angle) = guard.actor.bearing_of(&body.actor);
            if within_view(distance, angle, settings) {
                alerts.push(GameEvent::PlayerDetected {
                    guard: guard.id,
                    cause: DetectionCause::Body { body: body.id },
                });
            }
        }
    }

    alerts
}

/// Grab guards the player walks into and finish off those past the grace period.
///
/// A guard is grabbed when the player's hitbox contains the guard's center.
/// Grabbed guards stop seeing and moving at once; after `takedown_grace_ms`
/// they are dead.
pub fn resolve_takedowns(
    player: &Player,
    guards: &mut [Guard],
    now_ms: u64,
    settings: &Settings,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let rect = player.actor.rect();

    for guard in guards.iter_mut().filter(|g| g.alive) {
        match guard.killed_at_ms {
            None => {
                if rect.contains_point(guard.actor.center()) {
                    guard.killed_at_ms = Some(now_ms);
                    guard.actor.pose = AnimationPose::Standing;
                    log::debug!("{} grabbed", guard.name);
                    events.push(GameEvent::GuardGrabbed { guard: guard.id });
                }
            }
            Some(killed_at) => {
                if now_ms.saturating_sub(killed_at) > settings.takedown_grace_ms {
                    guard.alive = false;
                    guard.actor.pose = AnimationPose::Dead;
                    log::debug!("{} is down", guard.name);
                    events.push(GameEvent::GuardKilled { guard: guard.id });
                }
            }
        }
    }

    events
}

/// Player hitbox touches the goal
pub fn goal_reached(player: &Player, goal: &Rect) -> bool {
    player.actor.rect().overlaps(goal)
}
