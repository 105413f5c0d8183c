//! Player movement
//!
//! Turning is applied every tick without any checks. Walking drives the walk
//! cycle every tick but only steps the position when the throttle allows, and
//! only if the new hitbox is clear of every obstacle.

use super::collision::ObstacleMap;
use super::state::{AnimationPose, Player};
use super::tick::TickInput;
use super::timing::walk_cycle_pose;
use crate::settings::Settings;
use crate::{heading_vector, normalize_degrees};

/// Advance the player by one tick
pub fn update_player(
    player: &mut Player,
    input: &TickInput,
    now_ms: u64,
    obstacles: &ObstacleMap,
    settings: &Settings,
) {
    apply_run_modifier(player, input.run, settings);

    // Turning; left and right together cancel out
    let actor = &mut player.actor;
    if input.turn_left {
        actor.rotation += actor.rotation_speed;
    }
    if input.turn_right {
        actor.rotation -= actor.rotation_speed;
    }
    actor.rotation = normalize_degrees(actor.rotation);

    // Forward edges start and stop the walk cycle
    if input.move_forward && !player.moving {
        actor.walk_start_ms = Some(now_ms);
    } else if !input.move_forward && player.moving {
        actor.walk_start_ms = None;
        actor.pose = AnimationPose::Standing;
    }
    player.moving = input.move_forward;

    if !input.move_forward {
        return;
    }

    let walk_start = *actor.walk_start_ms.get_or_insert(now_ms);
    actor.pose = walk_cycle_pose(
        now_ms.saturating_sub(walk_start),
        actor.speed,
        settings.walk_cycle_base_ms,
    );

    if !actor.throttle.is_due(now_ms) {
        return;
    }

    let delta = heading_vector(actor.rotation) * actor.speed;
    let candidate = actor.rect().translated(delta);
    if obstacles.would_collide(&candidate) {
        // Blocked: keep walking in place, but look like we stopped
        actor.pose = AnimationPose::Standing;
        log::trace!("Player blocked at ({:.1}, {:.1})", actor.pos.x, actor.pos.y);
    } else {
        actor.pos += delta;
        actor.throttle.mark(now_ms);
    }
}

/// Switch between walking and running speed on modifier edges only
fn apply_run_modifier(player: &mut Player, run: bool, settings: &Settings) {
    if run == player.running {
        return;
    }
    player.running = run;
    player.actor.speed = if run {
        player.base_speed * settings.run_multiplier
    } else {
        player.base_speed
    };
    log::debug!("Player {}", if run { "running" } else { "walking" });
}
