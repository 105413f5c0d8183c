//! Read-only view of a session for rendering
//!
//! Plain data only: a renderer draws from this without touching the live
//! session.

use glam::Vec2;
use serde::Serialize;

use super::geometry::Rect;
use super::state::{Actor, AnimationPose, Guard, GuardId, SessionPhase, SessionState};

/// Where and how to draw one character
#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub pose: AnimationPose,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            pos: actor.pos,
            size: actor.size,
            rotation: actor.rotation,
            pose: actor.pose,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardView {
    pub id: GuardId,
    pub name: String,
    pub actor: ActorView,
    pub alive: bool,
    /// Grabbed, grace period still running (draw the scuffle)
    pub fighting: bool,
    /// Draw the view cone (only guards that can still see)
    pub show_view_range: bool,
    pub view_range_origin: Vec2,
    pub view_range_size: f32,
}

impl From<&Guard> for GuardView {
    fn from(guard: &Guard) -> Self {
        Self {
            id: guard.id,
            name: guard.name.clone(),
            actor: ActorView::from(&guard.actor),
            alive: guard.alive,
            fighting: guard.in_fight(),
            show_view_range: guard.is_alert(),
            view_range_origin: guard.view_range_origin(),
            view_range_size: guard.view_range_size(),
        }
    }
}

/// Everything a frame needs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub time_ticks: u64,
    pub player: ActorView,
    pub player_hiding: bool,
    /// Player has not moved off the spawn point yet
    pub show_start_hint: bool,
    pub guards: Vec<GuardView>,
    pub bushes: Vec<Rect>,
    pub goal: Rect,
}

impl SessionState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            player: ActorView::from(&self.player.actor),
            player_hiding: self.player.hiding,
            show_start_hint: self.player.at_spawn(),
            guards: self.guards.iter().map(GuardView::from).collect(),
            bushes: self.bushes.iter().map(|b| b.rect()).collect(),
            goal: self.goal,
        }
    }
}
