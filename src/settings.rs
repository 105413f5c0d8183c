//! Simulation tuning
//!
//! Timing and perception constants, loadable from a JSON file. The map layout
//! itself is compiled in (see `sim::level`).

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::ConfigError;

/// Tuning values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Target steps per second (the tuning basis for every timing constant)
    pub fps: u32,
    /// Minimum gap between accepted position steps, as a fraction of `fps`, in ms
    pub step_throttle_factor: f32,
    /// Walk-cycle pose duration is `walk_cycle_base_ms / speed`
    pub walk_cycle_base_ms: f32,
    /// Delay between grabbing a guard and it going down
    pub takedown_grace_ms: u64,

    // === Movement ===
    /// Speed multiplier while the run modifier is held
    pub run_multiplier: f32,

    // === Perception ===
    /// Guards notice anything strictly closer than this
    pub detection_radius: f32,
    /// Half-angle of the view cone in degrees
    pub view_half_angle_deg: f32,

    // === Level ===
    /// Seed for the bush scatter
    pub bush_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            step_throttle_factor: 0.6,
            walk_cycle_base_ms: 500.0,
            takedown_grace_ms: 200,

            run_multiplier: 2.0,

            detection_radius: 140.0,
            view_half_angle_deg: 80.0,

            bush_seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Minimum milliseconds between accepted position steps.
    ///
    /// The frame *rate* times `step_throttle_factor`, read as milliseconds
    /// (36 ms at 60 FPS). The stutter-step feel depends on it.
    pub fn step_interval_ms(&self) -> f32 {
        self.fps as f32 * self.step_throttle_factor
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidSettings("fps must be positive".into()));
        }
        let positive = [
            ("step_throttle_factor", self.step_throttle_factor),
            ("walk_cycle_base_ms", self.walk_cycle_base_ms),
            ("run_multiplier", self.run_multiplier),
            ("detection_radius", self.detection_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.view_half_angle_deg > 0.0 && self.view_half_angle_deg <= 180.0) {
            return Err(ConfigError::InvalidSettings(format!(
                "view_half_angle_deg must be in (0, 180], got {}",
                self.view_half_angle_deg
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
