//! Session state and actor types
//!
//! The session owns every actor for its whole lifetime; the tick functions
//! borrow it mutably once per frame.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::ObstacleMap;
use super::geometry::{Rect, distance_and_bearing};
use super::level::{GuardSpec, Level};
use super::timing::StepThrottle;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Index of a guard in `SessionState::guards`
pub type GuardId = usize;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start input
    StartScreen,
    /// Active gameplay
    Playing,
    /// A guard spotted the player or a body (terminal)
    Detected,
    /// The player reached the king (terminal)
    GoalReached,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Detected | SessionPhase::GoalReached)
    }
}

/// Which sprite the renderer should draw for an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationPose {
    #[default]
    Standing,
    RightFoot,
    LeftFoot,
    Dead,
}

/// What a guard noticed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionCause {
    /// The player in plain sight
    Player,
    /// A guard that has been taken down
    Body { body: GuardId },
}

/// Signals produced by a tick, cleared at the start of the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start screen dismissed
    Started,
    /// Player grabbed a guard; it goes down after the grace period
    GuardGrabbed { guard: GuardId },
    /// Grace period over, the guard is now a body
    GuardKilled { guard: GuardId },
    /// Walking guard reached an endpoint and turned back
    PatrolReversed { guard: GuardId },
    /// Terminal: a guard raised the alarm
    PlayerDetected { guard: GuardId, cause: DetectionCause },
    /// Terminal: the player found the king
    GoalReached,
}

/// Shared positional and animation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner of the hitbox
    pub pos: Vec2,
    /// Side length of the square hitbox
    pub size: f32,
    /// Facing in degrees, [0, 360), 0 = up
    pub rotation: f32,
    /// Units per accepted step
    pub speed: f32,
    /// Degrees per tick while turning
    pub rotation_speed: f32,
    pub pose: AnimationPose,
    /// When the current walk cycle began
    pub walk_start_ms: Option<u64>,
    pub throttle: StepThrottle,
}

impl Actor {
    pub fn new(pos: Vec2, size: f32, rotation: f32, speed: f32, step_interval_ms: f32) -> Self {
        Self {
            pos,
            size,
            rotation: crate::normalize_degrees(rotation),
            speed,
            rotation_speed: 0.0,
            pose: AnimationPose::Standing,
            walk_start_ms: None,
            throttle: StepThrottle::new(step_interval_ms),
        }
    }

    /// Hitbox, always `(x, y, size, size)`
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Distance and bearing of `observer` relative to where this actor faces
    pub fn bearing_of(&self, observer: &Actor) -> (f32, f32) {
        distance_and_bearing(observer.center(), self.center(), self.rotation)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    /// Walking speed without the run modifier
    pub base_speed: f32,
    /// Recomputed every tick from bush overlap
    pub hiding: bool,
    /// Run modifier state as of the last tick
    pub running: bool,
    /// Forward input state as of the last tick
    pub moving: bool,
    /// Spawn point (for the start hint)
    pub spawn: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        let mut actor = Actor::new(
            pos,
            CHARACTER_SIZE,
            PLAYER_START_ROTATION,
            PLAYER_SPEED,
            settings.step_interval_ms(),
        );
        actor.rotation_speed = PLAYER_ROTATION_SPEED;
        Self {
            actor,
            base_speed: PLAYER_SPEED,
            hiding: false,
            running: false,
            moving: false,
            spawn: pos,
        }
    }

    /// Still standing where the session put us
    pub fn at_spawn(&self) -> bool {
        self.actor.pos == self.spawn
    }
}

/// Axis a walking guard patrols along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolAxis {
    Horizontal,
    Vertical,
}

impl FromStr for PatrolAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(PatrolAxis::Horizontal),
            "vertical" => Ok(PatrolAxis::Vertical),
            _ => Err(ConfigError::UnknownPatrolAxis(s.to_string())),
        }
    }
}

/// One of the four headings a patrol can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    North,
    West,
    South,
    East,
}

impl Heading {
    /// Rotation in degrees for this heading
    pub fn degrees(&self) -> f32 {
        match self {
            Heading::North => 0.0,
            Heading::West => 90.0,
            Heading::South => 180.0,
            Heading::East => 270.0,
        }
    }

    /// Unit step in screen space
    pub fn step(&self) -> Vec2 {
        match self {
            Heading::North => Vec2::new(0.0, -1.0),
            Heading::West => Vec2::new(-1.0, 0.0),
            Heading::South => Vec2::new(0.0, 1.0),
            Heading::East => Vec2::new(1.0, 0.0),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Heading::North => Heading::South,
            Heading::West => Heading::East,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "north",
            Heading::West => "west",
            Heading::South => "south",
            Heading::East => "east",
        };
        f.write_str(name)
    }
}

/// Back-and-forth route of a walking guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patrol {
    /// First endpoint (the guard's spawn point)
    pub start: Vec2,
    /// Second endpoint
    pub end: Vec2,
    pub axis: PatrolAxis,
    /// Heading required before the guard translates again
    pub heading: Heading,
    /// Latched on arrival, cleared once both endpoints are left behind
    pub at_targets: bool,
    /// Set until the guard first leaves its spawn area
    pub at_start: bool,
}

impl Patrol {
    /// Route from `start` to `target` along `axis`.
    ///
    /// `target` is the x coordinate for horizontal patrols, y for vertical.
    pub fn new(start: Vec2, axis: PatrolAxis, target: f32) -> Result<Self, ConfigError> {
        let (end, distance, heading) = match axis {
            PatrolAxis::Horizontal => {
                let heading = if start.x > target { Heading::West } else { Heading::East };
                (Vec2::new(target, start.y), (target - start.x).abs(), heading)
            }
            PatrolAxis::Vertical => {
                let heading = if start.y > target { Heading::North } else { Heading::South };
                (Vec2::new(start.x, target), (target - start.y).abs(), heading)
            }
        };

        if distance <= MIN_PATROL_LENGTH {
            return Err(ConfigError::EndpointsTooClose {
                distance,
                minimum: MIN_PATROL_LENGTH,
            });
        }

        Ok(Self {
            start,
            end,
            axis,
            heading,
            at_targets: true,
            at_start: true,
        })
    }
}

/// Standing or walking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GuardKind {
    Standing,
    Walking(Patrol),
}

/// A guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guard {
    pub id: GuardId,
    pub name: String,
    pub actor: Actor,
    /// False once the takedown grace period has run out
    pub alive: bool,
    /// When the player grabbed this guard
    pub killed_at_ms: Option<u64>,
    /// View cone footprint relative to the guard's size
    pub view_range_scale: f32,
    pub kind: GuardKind,
}

impl Guard {
    pub fn standing(id: GuardId, name: impl Into<String>, pos: Vec2, rotation: f32) -> Self {
        Self {
            id,
            name: name.into(),
            actor: Actor::new(pos, CHARACTER_SIZE, rotation, 0.0, 0.0),
            alive: true,
            killed_at_ms: None,
            view_range_scale: VIEW_RANGE_SCALE,
            kind: GuardKind::Standing,
        }
    }

    pub fn walking(
        id: GuardId,
        name: impl Into<String>,
        pos: Vec2,
        rotation: f32,
        speed: f32,
        patrol: Patrol,
        step_interval_ms: f32,
    ) -> Result<Self, ConfigError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidSettings(format!(
                "walking guard speed must be positive, got {speed}"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            actor: Actor::new(pos, CHARACTER_SIZE, rotation, speed, step_interval_ms),
            alive: true,
            killed_at_ms: None,
            view_range_scale: VIEW_RANGE_SCALE,
            kind: GuardKind::Walking(patrol),
        })
    }

    /// Build a guard from its level entry
    pub fn from_spec(id: GuardId, spec: &GuardSpec, settings: &Settings) -> Result<Self, ConfigError> {
        let pos = Vec2::new(spec.x, spec.y);
        match &spec.patrol {
            None => Ok(Self::standing(id, spec.name, pos, spec.rotation)),
            Some(route) => {
                let axis: PatrolAxis = route.axis.parse()?;
                let patrol = Patrol::new(pos, axis, route.target)?;
                Self::walking(
                    id,
                    spec.name,
                    pos,
                    spec.rotation,
                    route.speed,
                    patrol,
                    settings.step_interval_ms(),
                )
            }
        }
    }

    /// Alive and not yet grabbed: the only state in which a guard can see
    pub fn is_alert(&self) -> bool {
        self.alive && self.killed_at_ms.is_none()
    }

    /// Grabbed at some point, alive or not
    pub fn is_body(&self) -> bool {
        self.killed_at_ms.is_some()
    }

    /// Grabbed but the grace period has not run out yet
    pub fn in_fight(&self) -> bool {
        self.alive && self.killed_at_ms.is_some()
    }

    /// Top-left of the view cone sprite, centered on the guard
    pub fn view_range_origin(&self) -> Vec2 {
        self.actor.center() - Vec2::splat(self.view_range_size() / 2.0)
    }

    pub fn view_range_size(&self) -> f32 {
        self.actor.size * self.view_range_scale
    }
}

/// A cover zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bush {
    pub pos: Vec2,
    pub size: f32,
}

impl Bush {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    /// Sprite footprint
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Hiding zone: the centered middle third of the sprite
    pub fn core_rect(&self) -> Rect {
        let third = self.size / 3.0;
        Rect::new(self.pos.x + third, self.pos.y + third, third, third)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub settings: Settings,
    pub phase: SessionPhase,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Latest timestamp seen; later ticks never go below it
    pub last_now_ms: Option<u64>,
    pub player: Player,
    pub guards: Vec<Guard>,
    pub bushes: Vec<Bush>,
    pub obstacles: ObstacleMap,
    /// Reaching this wins
    pub goal: Rect,
    /// Signals from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// New session on the standard map
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let level = Level::standard();
        Self::from_level(settings, &level)
    }

    /// New session on an arbitrary layout
    pub fn from_level(settings: Settings, level: &Level) -> Result<Self, ConfigError> {
        settings.validate()?;
        level.validate()?;

        let guards = level
            .guards
            .iter()
            .enumerate()
            .map(|(id, spec)| Guard::from_spec(id, spec, &settings))
            .collect::<Result<Vec<_>, _>>()?;
        let bushes = level.place_bushes(settings.bush_seed);
        let player = Player::new(level.player_start, &settings);

        log::info!(
            "Session created: {} guards, {} bushes, {} obstacles (seed {})",
            guards.len(),
            bushes.len(),
            level.obstacles.len(),
            settings.bush_seed
        );

        Ok(Self {
            settings,
            phase: SessionPhase::StartScreen,
            time_ticks: 0,
            last_now_ms: None,
            player,
            guards,
            bushes,
            obstacles: ObstacleMap::new(level.obstacles.clone()),
            goal: level.goal,
            events: Vec::new(),
        })
    }
}
