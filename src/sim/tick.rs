//! Per-frame simulation tick
//!
//! Applies the frame's actions, then advances the run by `dt` milliseconds.

use super::collision::first_hit;
use super::state::{GamePhase, GameState};

/// Actions to apply at the top of a tick (one slot each)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Begin a run from Ready
    pub start: bool,
    /// Begin a fresh run from Over
    pub restart: bool,
    /// Flip gravity (also starts a run from Ready)
    pub invert_gravity: bool,
    /// Pause/resume
    pub toggle_pause: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    GravityFlipped,
    Paused,
    Resumed,
    ObstacleSpawned,
    /// Run ended; carries the final score
    Crashed { score: f64 },
}

/// Apply input and advance the game state by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let started = apply_input(state, input, &mut events);

    // A run's first tick has no elapsed time behind it
    let dt = if started { 0.0 } else { dt.max(0.0) };

    if state.is_running() {
        advance(state, dt, &mut events);
    }

    events
}

/// Apply one tick's worth of actions. Returns true if a run started.
fn apply_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) -> bool {
    let mut started = false;

    if input.start && state.phase == GamePhase::Ready {
        started |= start_run(state, events);
    }
    if input.restart && state.phase == GamePhase::Over {
        started |= start_run(state, events);
    }

    if input.invert_gravity {
        if state.phase == GamePhase::Ready {
            started |= start_run(state, events);
        }
        if state.is_running() {
            state.player.invert(&state.tuning);
            events.push(GameEvent::GravityFlipped);
        }
    }

    if input.toggle_pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at score {:.0}", state.counters.score);
                events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
                events.push(GameEvent::Resumed);
            }
            GamePhase::Ready | GamePhase::Over => {}
        }
    }

    started
}

fn start_run(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.start() {
        log::info!("Run started (seed {})", state.spawner.seed());
        events.push(GameEvent::Started);
        true
    } else {
        false
    }
}

/// Steps 1-5 of a running tick. Order matters for exact counter progression.
fn advance(state: &mut GameState, dt: f64, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let counters = &mut state.counters;

    counters.speed += tuning.speed_increment * dt;
    counters.score += dt / 1000.0 * 100.0;

    if let Some(obstacle) = state.spawner.advance(counters, tuning, dt) {
        log::debug!(
            "Spawned {:?} obstacle, next in {}ms",
            obstacle.attachment,
            counters.spawn_interval
        );
        state.obstacles.push(obstacle);
        events.push(GameEvent::ObstacleSpawned);
    }

    let speed = counters.speed as f32;
    let despawn_margin = tuning.despawn_margin;
    state.obstacles.retain_mut(|ob| {
        ob.pos.x -= speed;
        !ob.is_gone(despawn_margin)
    });

    if first_hit(&state.player, &state.obstacles).is_some() {
        state.phase = GamePhase::Over;
        let score = state.counters.score;
        log::info!("Crashed with score {:.0}", score);
        events.push(GameEvent::Crashed { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Attachment, Gravity, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;
    const POS_EPS: f32 = 1e-3;

    fn running_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    fn flip() -> TickInput {
        TickInput {
            invert_gravity: true,
            ..Default::default()
        }
    }

    fn pause() -> TickInput {
        TickInput {
            toggle_pause: true,
            ..Default::default()
        }
    }

    fn far_obstacle(x: f32) -> Obstacle {
        // Ceiling obstacle; the floor player never touches it
        Obstacle {
            pos: Vec2::new(x, 40.0),
            size: Vec2::new(40.0, 90.0),
            attachment: Attachment::Ceiling,
        }
    }

    #[test]
    fn test_ready_does_not_advance() {
        let mut state = GameState::new(Tuning::default(), 1);
        let events = tick(&mut state, &TickInput::default(), 16.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.counters.score, 0.0);
        assert_eq!(state.counters.speed, 5.0);
    }

    #[test]
    fn test_counters_progress_exactly() {
        let mut state = running_state();
        let dts = [16.0, 17.0, 16.5, 33.0, 0.0, 50.0];
        let mut total = 0.0;
        for dt in dts {
            tick(&mut state, &TickInput::default(), dt);
            total += dt;
            assert!((state.counters.speed - (5.0 + 0.0008 * total)).abs() < EPS);
            assert!((state.counters.score - total / 10.0).abs() < EPS);
        }
        assert_eq!(state.counters.spawn_timer, total);
    }

    #[test]
    fn test_spawn_cadence_and_interval_shrink() {
        let mut state = running_state();
        let mut spawned = 0;
        // 100 ticks of 100ms = 10s
        for _ in 0..100 {
            // Keep the track clear so the run can't end
            state.obstacles.clear();
            let events = tick(&mut state, &TickInput::default(), 100.0);
            spawned += events
                .iter()
                .filter(|e| **e == GameEvent::ObstacleSpawned)
                .count();
        }
        // Intervals 1000 down to 910 each round up to ten 100ms ticks
        assert_eq!(spawned, 10);
        assert_eq!(state.counters.spawn_interval, 900.0);
    }

    #[test]
    fn test_flip_from_ready_starts_and_flips() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.counters.score = 123.0;

        let events = tick(&mut state, &flip(), 500.0);
        assert_eq!(events, vec![GameEvent::Started, GameEvent::GravityFlipped]);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.gravity, Gravity::Ceiling);
        assert_eq!(state.player.pos.y, 40.0);
        // Start tick runs with dt = 0
        assert_eq!(state.counters.score, 0.0);
        assert_eq!(state.counters.speed, 5.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_flip_ignored_while_paused() {
        let mut state = running_state();
        tick(&mut state, &pause(), 16.0);
        assert_eq!(state.phase, GamePhase::Paused);

        let before_pos = state.player.pos;
        let before_counters = state.counters.clone();
        let events = tick(&mut state, &flip(), 16.0);

        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.player.gravity, Gravity::Floor);
        assert_eq!(state.player.pos, before_pos);
        assert_eq!(state.counters, before_counters);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = running_state();
        state.obstacles.push(far_obstacle(500.0));
        tick(&mut state, &pause(), 16.0);
        let frozen_counters = state.counters.clone();
        let frozen_obstacles = state.obstacles.clone();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        assert_eq!(state.counters, frozen_counters);
        assert_eq!(state.obstacles, frozen_obstacles);

        let events = tick(&mut state, &pause(), 16.0);
        assert_eq!(events, vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.counters.score > frozen_counters.score);
    }

    #[test]
    fn test_pause_ignored_outside_run() {
        let mut state = GameState::new(Tuning::default(), 1);
        tick(&mut state, &pause(), 16.0);
        assert_eq!(state.phase, GamePhase::Ready);

        state.phase = GamePhase::Over;
        tick(&mut state, &pause(), 16.0);
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_flip_then_pause_same_tick() {
        let mut state = running_state();
        let input = TickInput {
            invert_gravity: true,
            toggle_pause: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, 16.0);
        assert_eq!(events, vec![GameEvent::GravityFlipped, GameEvent::Paused]);
        assert_eq!(state.player.gravity, Gravity::Ceiling);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_obstacle_removal_threshold() {
        let mut state = running_state();
        state.obstacles.push(far_obstacle(-51.0));
        state.obstacles.push(far_obstacle(-9.0));

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!((state.obstacles[0].pos.x - (-14.0)).abs() < POS_EPS);
    }

    #[test]
    fn test_obstacles_scroll_by_speed() {
        let mut state = running_state();
        state.obstacles.push(far_obstacle(600.0));
        state.obstacles.push(far_obstacle(700.0));

        tick(&mut state, &TickInput::default(), 10.0);
        let speed = state.counters.speed as f32;
        assert!((state.obstacles[0].pos.x - (600.0 - speed)).abs() < POS_EPS);
        assert!((state.obstacles[1].pos.x - (700.0 - speed)).abs() < POS_EPS);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = running_state();
        tick(&mut state, &TickInput::default(), 100.0);
        let floor_ob = Obstacle::spawn(Attachment::Floor, &state.tuning);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(state.player.pos.x + 10.0, floor_ob.pos.y),
            ..floor_ob
        });

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Over);
        match events.as_slice() {
            [GameEvent::Crashed { score }] => assert!((score - 10.0).abs() < EPS),
            other => panic!("unexpected events: {:?}", other),
        }

        // Over is terminal for the run: nothing advances, flips are dropped
        let score = state.counters.score;
        let events = tick(&mut state, &flip(), 100.0);
        assert!(events.is_empty());
        assert_eq!(state.counters.score, score);
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_restart_clears_run() {
        let mut state = running_state();
        tick(&mut state, &flip(), 16.0);
        assert_eq!(state.player.gravity, Gravity::Ceiling);
        state.obstacles.push(far_obstacle(300.0));
        state.phase = GamePhase::Over;
        state.counters.score = 900.0;

        // Start is a Ready-only command
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            16.0,
        );
        assert_eq!(state.phase, GamePhase::Over);

        let events = tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            16.0,
        );
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.gravity, Gravity::Floor);
        assert_eq!(state.player.pos.y, state.tuning.floor_y());
        assert_eq!(state.counters.score, 0.0);
        assert_eq!(state.counters.spawn_interval, 1000.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state();
        let mut b = running_state();
        for i in 0..600 {
            let input = if i % 45 == 0 { flip() } else { TickInput::default() };
            let ea = tick(&mut a, &input, 16.0);
            let eb = tick(&mut b, &input, 16.0);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.counters, b.counters);
    }

    #[test]
    fn test_long_run_counters_do_not_drift() {
        let mut state = running_state();
        let dt = 1000.0 / 60.0;
        let mut elapsed = 0.0f64;
        // Ten minutes at 60 fps
        for _ in 0..36_000 {
            state.obstacles.clear();
            tick(&mut state, &TickInput::default(), dt);
            elapsed += dt;
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!((state.counters.score - elapsed / 10.0).abs() < 1e-4);
        assert!((state.counters.speed - (5.0 + 0.0008 * elapsed)).abs() < 1e-6);
        assert!((state.counters.score - 60_000.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_speed_and_score_track_elapsed(dts in prop::collection::vec(0.0f64..50.0, 1..200)) {
            let mut state = running_state();
            let mut total = 0.0f64;
            let mut last_speed = state.counters.speed;
            for dt in dts {
                state.obstacles.clear();
                tick(&mut state, &TickInput::default(), dt);
                total += dt;
                prop_assert!(state.counters.speed >= last_speed);
                last_speed = state.counters.speed;
            }
            let tolerance = 1e-9 * total.max(1.0);
            prop_assert!((state.counters.speed - (5.0 + 0.0008 * total)).abs() < tolerance);
            prop_assert!((state.counters.score - total / 10.0).abs() < tolerance);
        }

        #[test]
        fn prop_spawn_interval_in_range(dts in prop::collection::vec(0.0f64..1500.0, 1..300)) {
            let mut state = running_state();
            for dt in dts {
                state.obstacles.clear();
                tick(&mut state, &TickInput::default(), dt);
                prop_assert!((550.0..=1000.0).contains(&state.counters.spawn_interval));
            }
        }
    }
}
