//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Time comes in as a monotonic millisecond timestamp per tick
//! - The only randomness is the seeded bush scatter at session creation
//! - Guards are processed in id order
//! - No rendering, input polling or asset dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod movement;
pub mod patrol;
pub mod perception;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timing;

pub use collision::ObstacleMap;
pub use geometry::{Rect, distance_and_bearing};
pub use level::{BushRegion, GuardSpec, Level, PatrolSpec};
pub use snapshot::{ActorView, GuardView, Snapshot};
pub use state::{
    Actor, AnimationPose, Bush, DetectionCause, GameEvent, Guard, GuardId, GuardKind, Heading,
    Patrol, PatrolAxis, Player, SessionPhase, SessionState,
};
pub use tick::{TickInput, tick};
pub use timing::{StepThrottle, walk_cycle_pose};
