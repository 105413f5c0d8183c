//! Configuration errors
//!
//! Raised while building a session; the per-tick simulation is infallible.

use thiserror::Error;

/// A session could not be built from its configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Walking guard endpoints are too close for the leave-then-arrive latch
    #[error("patrol endpoints are {distance} apart, must be more than {minimum}")]
    EndpointsTooClose { distance: f32, minimum: f32 },
    /// Patrol axis string was neither horizontal nor vertical
    #[error("unknown patrol axis: {0:?}")]
    UnknownPatrolAxis(String),
    /// A tuning value is out of range
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
