//! Sneak - a top-down stealth game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, patrols, perception, session state)
//! - `settings`: Tuning constants shared by the simulation
//! - `error`: Configuration errors raised while building a session

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (steps per second)
    pub const FPS: u32 = 60;

    /// Map dimensions
    pub const MAP_WIDTH: f32 = 1280.0;
    pub const MAP_HEIGHT: f32 = 720.0;

    /// Side length of every character sprite/hitbox
    pub const CHARACTER_SIZE: f32 = 35.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (1200.0, 570.0);
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_ROTATION_SPEED: f32 = 4.0;
    pub const PLAYER_START_ROTATION: f32 = 90.0;

    /// Walking guard pace (also its turning rate in degrees/tick)
    pub const GUARD_SPEED: f32 = 3.0;

    /// Guards render a view cone this many times their own size
    pub const VIEW_RANGE_SCALE: f32 = 8.0;

    /// Bush sprite side length; the hiding core is a third of it
    pub const BUSH_SIZE: f32 = 50.0;

    /// Length of the synthetic facing leg used by the bearing test
    pub const BEARING_LEG: f32 = 100.0;

    /// Walking guard endpoints must be further apart than this
    pub const MIN_PATROL_LENGTH: f32 = 100.0;
    /// A patrol counts as "left" both endpoints beyond this distance
    pub const PATROL_LEAVE_DISTANCE: f32 = 50.0;

    /// The king's location (the goal)
    pub const GOAL_RECT: (f32, f32, f32, f32) = (40.0, 270.0, 60.0, 40.0);
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector an actor faces at `rotation` degrees.
///
/// Rotation 0 faces up (-y); positive rotation turns toward -x.
#[inline]
pub fn heading_vector(rotation: f32) -> Vec2 {
    let rad = rotation.to_radians();
    Vec2::new(-rad.sin(), -rad.cos())
}
