//! Per-frame simulation step
//!
//! Order within a playing tick: player, guards, hiding, alerts, goal,
//! takedowns. Alerts win over the goal when both happen on the same tick.

use serde::{Deserialize, Serialize};

use super::movement::update_player;
use super::patrol::advance_guard;
use super::perception::{goal_reached, resolve_takedowns, scan_for_alerts, update_hiding};
use super::state::{GameEvent, SessionPhase, SessionState};

/// Input intents for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Leave the start screen
    pub start: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub move_forward: bool,
    /// Run modifier held
    pub run: bool,
}

/// Advance the session by one frame at monotonic time `now_ms`
pub fn tick(state: &mut SessionState, input: &TickInput, now_ms: u64) {
    state.events.clear();

    match state.phase {
        SessionPhase::StartScreen => {
            if input.start {
                state.phase = SessionPhase::Playing;
                state.events.push(GameEvent::Started);
                log::info!("Session started");
            }
            return;
        }
        SessionPhase::Detected | SessionPhase::GoalReached => return,
        SessionPhase::Playing => {}
    }

    // Never let time run backwards
    let now_ms = match state.last_now_ms {
        Some(last) if now_ms < last => {
            log::warn!("Clock went backwards ({now_ms} < {last}), holding at {last}");
            last
        }
        _ => now_ms,
    };
    state.last_now_ms = Some(now_ms);
    state.time_ticks += 1;

    update_player(&mut state.player, input, now_ms, &state.obstacles, &state.settings);

    for guard in &mut state.guards {
        if advance_guard(guard, now_ms, &state.settings) {
            state.events.push(GameEvent::PatrolReversed { guard: guard.id });
        }
    }

    update_hiding(&mut state.player, &state.bushes);

    let alerts = scan_for_alerts(&state.player, &state.guards, &state.settings);
    if let Some(GameEvent::PlayerDetected { guard, cause }) = alerts.first() {
        log::info!(
            "Detected by {} ({:?}) after {} ticks",
            state.guards[*guard].name,
            cause,
            state.time_ticks
        );
        state.phase = SessionPhase::Detected;
        state.events.extend(alerts);
        return;
    }

    if goal_reached(&state.player, &state.goal) {
        log::info!("King found after {} ticks", state.time_ticks);
        state.phase = SessionPhase::GoalReached;
        state.events.push(GameEvent::GoalReached);
        return;
    }

    let takedowns = resolve_takedowns(&state.player, &mut state.guards, now_ms, &state.settings);
    state.events.extend(takedowns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FPS;
    use crate::settings::Settings;
    use crate::sim::geometry::Rect;
    use crate::sim::level::{GuardSpec, Level};
    use crate::sim::state::{AnimationPose, DetectionCause};
    use glam::Vec2;

    /// Monotonic milliseconds for tick `i` at the target frame rate
    fn frame_ms(i: u64) -> u64 {
        1_000 + i * 1000 / FPS as u64
    }

    fn started(level: &Level) -> SessionState {
        let mut state = SessionState::from_level(Settings::default(), level).unwrap();
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0,
        );
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
        state
    }

    fn forward() -> TickInput {
        TickInput {
            move_forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_screen_waits_for_start() {
        let mut state = SessionState::new(Settings::default()).unwrap();
        let pos = state.player.actor.pos;
        for i in 0..10 {
            tick(&mut state, &forward(), frame_ms(i));
        }
        assert_eq!(state.phase, SessionPhase::StartScreen);
        assert_eq!(state.player.actor.pos, pos);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_one_second_of_walking_is_throttled() {
        // Standard spawn, nothing in the way westwards for a while
        let mut state = started(&Level::standard());
        assert!(state.player.at_spawn());
        assert!(state.snapshot().show_start_hint);

        for i in 0..60 {
            tick(&mut state, &forward(), frame_ms(i));
        }
        assert_eq!(state.phase, SessionPhase::Playing);

        // A step every third frame: 20 steps of 3, not 60
        let moved = 1200.0 - state.player.actor.pos.x;
        assert!((moved - 60.0).abs() < 0.01, "moved {moved}");
        assert!((state.player.actor.pos.y - 570.0).abs() < 0.01);
        assert!(!state.snapshot().show_start_hint);
    }

    #[test]
    fn test_player_never_ends_inside_obstacle() {
        let mut level = Level::empty(Vec2::new(200.0, 200.0));
        level.obstacles = vec![
            Rect::new(100.0, 100.0, 20.0, 300.0),
            Rect::new(100.0, 100.0, 300.0, 20.0),
        ];
        let mut state = started(&level);

        // Walk in circles and straight lines into the corner
        for i in 0..600 {
            let input = TickInput {
                move_forward: true,
                turn_left: i % 90 < 20,
                run: i % 200 > 100,
                ..Default::default()
            };
            tick(&mut state, &input, frame_ms(i));
            assert!(!state.obstacles.would_collide(&state.player.actor.rect()));
        }
    }

    #[test]
    fn test_detection_is_terminal() {
        let mut level = Level::empty(Vec2::new(482.5, 382.5));
        // Faces the player from 100 below
        level.guards.push(GuardSpec::standing("Watcher", 482.5, 482.5, 0.0));
        let mut state = started(&level);

        tick(&mut state, &TickInput::default(), frame_ms(0));
        assert_eq!(state.phase, SessionPhase::Detected);
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerDetected {
                guard: 0,
                cause: DetectionCause::Player
            }]
        );

        // Nothing moves afterwards
        let pos = state.player.actor.pos;
        tick(&mut state, &forward(), frame_ms(1));
        assert_eq!(state.player.actor.pos, pos);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_hidden_player_is_safe() {
        let mut level = Level::empty(Vec2::new(482.5, 382.5));
        level.guards.push(GuardSpec::standing("Watcher", 482.5, 482.5, 0.0));
        level.bushes.push(Vec2::new(475.0, 375.0));
        let mut state = started(&level);

        for i in 0..30 {
            tick(&mut state, &TickInput::default(), frame_ms(i));
        }
        assert!(state.player.hiding);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_goal_reached() {
        let mut level = Level::empty(Vec2::new(200.0, 200.0));
        // Just west of the player, who spawns facing west
        level.goal = Rect::new(150.0, 200.0, 46.0, 35.0);
        let mut state = started(&level);

        tick(&mut state, &TickInput::default(), frame_ms(0));
        assert_eq!(state.phase, SessionPhase::Playing);

        // First step lands at x = 197, still clear; the second touches the goal
        tick(&mut state, &forward(), frame_ms(1));
        assert_eq!(state.phase, SessionPhase::Playing);
        for i in 2..10 {
            tick(&mut state, &forward(), frame_ms(i));
            if state.phase != SessionPhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, SessionPhase::GoalReached);
        assert_eq!(state.events, vec![GameEvent::GoalReached]);
    }

    #[test]
    fn test_takedown_from_behind() {
        // Victim faces north; the player comes up from the south
        let mut level = Level::empty(Vec2::new(500.0, 515.0));
        level.guards.push(GuardSpec::standing("Victim", 500.0, 500.0, 0.0));
        let mut state = started(&level);

        tick(&mut state, &TickInput::default(), frame_ms(0));
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.events, vec![GameEvent::GuardGrabbed { guard: 0 }]);
        assert!(state.guards[0].in_fight());
        assert!(state.snapshot().guards[0].fighting);
        assert!(!state.snapshot().guards[0].show_view_range);

        // Grace period is 200 ms: frame 12 is exactly 200 ms later
        for i in 1..=12 {
            tick(&mut state, &TickInput::default(), frame_ms(i));
            assert!(state.events.is_empty());
        }
        tick(&mut state, &TickInput::default(), frame_ms(13));
        assert_eq!(state.events, vec![GameEvent::GuardKilled { guard: 0 }]);
        assert!(!state.guards[0].alive);
        assert_eq!(state.snapshot().guards[0].actor.pose, AnimationPose::Dead);
    }

    #[test]
    fn test_witness_spots_grabbed_guard() {
        let mut level = Level::empty(Vec2::new(1000.0, 1000.0));
        // Victim faces south, witness 120 further south faces north at it
        level.guards.push(GuardSpec::standing("Victim", 500.0, 500.0, 180.0));
        level.guards.push(GuardSpec::standing("Witness", 500.0, 620.0, 0.0));
        // Cover behind the victim, so the witness can't see the player
        level.bushes.push(Vec2::new(490.0, 480.0));
        let mut state = started(&level);
        state.player.actor.pos = Vec2::new(500.0, 490.0);

        tick(&mut state, &TickInput::default(), frame_ms(0));
        assert!(state.player.hiding);
        assert_eq!(state.events, vec![GameEvent::GuardGrabbed { guard: 0 }]);

        // The victim is still alive, but the witness reacts to the struggle
        tick(&mut state, &TickInput::default(), frame_ms(1));
        assert_eq!(state.phase, SessionPhase::Detected);
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerDetected {
                guard: 1,
                cause: DetectionCause::Body { body: 0 }
            }]
        );
    }

    #[test]
    fn test_walking_guard_patrols_in_session() {
        let mut level = Level::empty(Vec2::new(1000.0, 600.0));
        level
            .guards
            .push(GuardSpec::walking("Walker", 100.0, 100.0, 270.0, "horizontal", 300.0));
        let mut state = started(&level);

        let mut reversals = 0;
        for i in 0..1000 {
            tick(&mut state, &TickInput::default(), frame_ms(i));
            reversals += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PatrolReversed { guard: 0 }))
                .count();
        }
        assert!(reversals >= 2);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_ne!(state.guards[0].actor.pose, AnimationPose::Dead);
    }

    #[test]
    fn test_bad_patrol_axis_rejected() {
        let mut level = Level::empty(Vec2::new(1000.0, 600.0));
        level
            .guards
            .push(GuardSpec::walking("Lost", 100.0, 100.0, 0.0, "diagonal", 300.0));
        assert!(SessionState::from_level(Settings::default(), &level).is_err());
    }

    #[test]
    fn test_clock_going_backwards_is_held() {
        let mut state = started(&Level::empty(Vec2::new(600.0, 300.0)));
        tick(&mut state, &forward(), 5_000);
        let x = state.player.actor.pos.x;
        // Earlier timestamp: no panic, no extra step
        tick(&mut state, &forward(), 4_000);
        assert_eq!(state.player.actor.pos.x, x);
        assert_eq!(state.last_now_ms, Some(5_000));
    }
}
