//! The compiled-in map
//!
//! One fixed level: the castle grounds with the king hiding in the west wing.
//! Bush placement is scattered inside fixed regions from a seed so the same
//! seed always gives the same cover.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::state::Bush;
use crate::consts::*;
use crate::error::ConfigError;

/// Route of a walking guard as written in the level table
#[derive(Debug, Clone)]
pub struct PatrolSpec {
    /// "horizontal" or "vertical"
    pub axis: &'static str,
    /// Far endpoint coordinate along `axis`
    pub target: f32,
    pub speed: f32,
}

/// One guard in the level table
#[derive(Debug, Clone)]
pub struct GuardSpec {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    /// None for a standing guard
    pub patrol: Option<PatrolSpec>,
}

impl GuardSpec {
    pub fn standing(name: &'static str, x: f32, y: f32, rotation: f32) -> Self {
        Self {
            name,
            x,
            y,
            rotation,
            patrol: None,
        }
    }

    pub fn walking(
        name: &'static str,
        x: f32,
        y: f32,
        rotation: f32,
        axis: &'static str,
        target: f32,
    ) -> Self {
        Self {
            name,
            x,
            y,
            rotation,
            patrol: Some(PatrolSpec {
                axis,
                target,
                speed: GUARD_SPEED,
            }),
        }
    }
}

/// Area bushes get scattered in; ranges are half-open like `a..b`
#[derive(Debug, Clone)]
pub struct BushRegion {
    pub x_range: (i32, i32),
    pub y_range: (i32, i32),
    pub count: usize,
}

/// Everything needed to build a session
#[derive(Debug, Clone)]
pub struct Level {
    pub player_start: Vec2,
    pub obstacles: Vec<Rect>,
    pub guards: Vec<GuardSpec>,
    /// Bushes at fixed spots
    pub bushes: Vec<Vec2>,
    /// Bushes at seeded random spots
    pub bush_regions: Vec<BushRegion>,
    pub goal: Rect,
}

impl Level {
    /// A level with nothing in it but the player
    pub fn empty(player_start: Vec2) -> Self {
        Self {
            player_start,
            obstacles: Vec::new(),
            guards: Vec::new(),
            bushes: Vec::new(),
            bush_regions: Vec::new(),
            // Far away so it never triggers by accident
            goal: Rect::new(-10_000.0, -10_000.0, 1.0, 1.0),
        }
    }

    /// The shipped map
    pub fn standard() -> Self {
        let (gx, gy, gw, gh) = GOAL_RECT;
        Self {
            player_start: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            obstacles: standard_obstacles(),
            guards: standard_guards(),
            bushes: Vec::new(),
            bush_regions: standard_bush_regions(),
            goal: Rect::new(gx, gy, gw, gh),
        }
    }

    /// Every scatter region must have room to place a bush in
    pub fn validate(&self) -> Result<(), ConfigError> {
        for region in &self.bush_regions {
            let (x0, x1) = region.x_range;
            let (y0, y1) = region.y_range;
            if x0 >= x1 || y0 >= y1 {
                return Err(ConfigError::InvalidSettings(format!(
                    "empty bush region x {x0}..{x1}, y {y0}..{y1}"
                )));
            }
        }
        Ok(())
    }

    /// Fixed bushes followed by the seeded scatter.
    ///
    /// Regions must pass `validate` first; an empty range has nothing to pick.
    pub fn place_bushes(&self, seed: u64) -> Vec<Bush> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut bushes: Vec<Bush> = self
            .bushes
            .iter()
            .map(|&pos| Bush::new(pos, BUSH_SIZE))
            .collect();

        for region in &self.bush_regions {
            for _ in 0..region.count {
                let x = rng.random_range(region.x_range.0..region.x_range.1);
                let y = rng.random_range(region.y_range.0..region.y_range.1);
                bushes.push(Bush::new(Vec2::new(x as f32, y as f32), BUSH_SIZE));
            }
        }

        bushes
    }
}

fn standard_obstacles() -> Vec<Rect> {
    vec![
        // Map edges
        Rect::new(0.0, 0.0, 10.0, MAP_HEIGHT),
        Rect::new(0.0, 0.0, MAP_WIDTH, 20.0),
        Rect::new(0.0, MAP_HEIGHT - 20.0, MAP_WIDTH, 20.0),
        Rect::new(MAP_WIDTH - 10.0, 1.0, 10.0, MAP_HEIGHT),
        // Inner castle walls
        Rect::new(644.0, 32.0, 49.0, 323.0),
        Rect::new(644.0, 430.0, 49.0, 237.0),
        Rect::new(167.0, 31.0, 49.0, 228.0),
        Rect::new(167.0, 336.0, 49.0, 156.0),
        Rect::new(148.0, 446.0, 67.0, 46.0),
        // Moat (the bridges are the gaps)
        Rect::new(438.0, 0.0, 118.0, 110.0),
        Rect::new(438.0, 163.0, 118.0, 380.0),
        Rect::new(438.0, 595.0, 118.0, 120.0),
        // West wing
        Rect::new(0.0, 0.0, 500.0, 50.0),
        Rect::new(0.0, 0.0, 150.0, 115.0),
        Rect::new(0.0, 115.0, 70.0, 30.0),
        Rect::new(0.0, 145.0, 40.0, 30.0),
        Rect::new(0.0, 420.0, 40.0, 30.0),
        Rect::new(0.0, 448.0, 142.0, 300.0),
        Rect::new(142.0, 640.0, 25.0, 100.0),
        Rect::new(275.0, 50.0, 55.0, 25.0),
        Rect::new(550.0, 675.0, 30.0, 30.0),
        // Courtyard
        Rect::new(915.0, 220.0, 55.0, 310.0),
        Rect::new(950.0, 480.0, 50.0, 180.0),
        Rect::new(915.0, 610.0, 55.0, 310.0),
        // Eastern cliffs
        Rect::new(1145.0, 20.0, 150.0, 30.0),
        Rect::new(1210.0, 50.0, 150.0, 30.0),
        Rect::new(1230.0, 80.0, 150.0, 20.0),
        Rect::new(1250.0, 80.0, 150.0, 40.0),
        Rect::new(1250.0, 345.0, 150.0, 30.0),
        Rect::new(1225.0, 370.0, 150.0, 30.0),
        Rect::new(1195.0, 400.0, 150.0, 30.0),
        Rect::new(1165.0, 430.0, 150.0, 30.0),
        Rect::new(1142.0, 460.0, 150.0, 40.0),
    ]
}

fn standard_guards() -> Vec<GuardSpec> {
    vec![
        GuardSpec::standing("Guard_1", 1075.0, 570.0, 90.0),
        GuardSpec::standing("Guard_2", 1040.0, 200.0, 180.0),
        GuardSpec::walking("Guard_3", 1040.0, 250.0, 0.0, "vertical", 400.0),
        GuardSpec::walking("Guard_4", 710.0, 120.0, 270.0, "horizontal", 850.0),
        GuardSpec::walking("Guard_5", 735.0, 200.0, 180.0, "vertical", 375.0),
        GuardSpec::standing("Guard_6", 825.0, 440.0, 270.0),
        GuardSpec::walking("Guard_7", 300.0, 120.0, 270.0, "horizontal", 625.0),
        GuardSpec::walking("Guard_8", 300.0, 550.0, 270.0, "horizontal", 625.0),
        GuardSpec::walking("Guard_9", 300.0, 150.0, 270.0, "vertical", 520.0),
        GuardSpec::standing("Guard_10", 225.0, 280.0, 270.0),
    ]
}

fn standard_bush_regions() -> Vec<BushRegion> {
    let region = |x_range, y_range, count| BushRegion {
        x_range,
        y_range,
        count,
    };
    vec![
        region((1075, 1200), (100, 300), 25),
        region((1075, 1150), (300, 350), 5),
        region((700, 900), (25, 75), 10),
        region((800, 850), (200, 350), 15),
        region((700, 850), (575, 625), 7),
        region((200, 230), (450, 650), 12),
        region((225, 240), (100, 200), 7),
        region((375, 400), (200, 450), 10),
    ]
}
