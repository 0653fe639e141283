//! Per-frame simulation step
//!
//! Frame order: input, timers, stars, then either combat or the idle meteor.

use glam::Vec2;
use rand::Rng;

use super::combat::{Enemy, resolve_collisions, retain_active};
use super::entity::Simulate;
use super::event::SimEvent;
use super::state::SimState;
use crate::consts::*;

/// Input gathered between two frames
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Latest pointer position
    pub pointer: Option<Vec2>,
    /// Latest canvas size
    pub resize: Option<Vec2>,
    /// Primary-action press positions since the last frame, oldest first
    pub shots: Vec<Vec2>,
    /// Combat button pressed
    pub toggle_combat: bool,
    /// A navigation control asked for a hyperspace jump
    pub engage_warp: bool,
}

impl FrameInput {
    /// Clear one-shot inputs after they were processed
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the simulation by one frame
///
/// Entity motion is per frame; `dt_ms` only drives the timers.
pub fn tick(state: &mut SimState, input: &FrameInput, dt_ms: f64) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if let Some(size) = input.resize {
        state.resize(size.x, size.y);
    }
    if let Some(pointer) = input.pointer {
        state.set_pointer(pointer);
    }

    // Shots land before the toggle so the click that starts combat doesn't fire
    for &at in &input.shots {
        state.fire(at);
    }
    if input.toggle_combat {
        events.push(state.toggle_combat());
    }
    if input.engage_warp && state.engage_warp() {
        events.push(SimEvent::WarpEngaged);
    }

    state.clock.advance(dt_ms);
    state.run_due_tasks(&mut events);

    let env = state.step_env();
    for star in &mut state.stars {
        star.step(&env, &mut state.rng);
    }

    if state.mode.game_active {
        if state.rng.random::<f32>() < ENEMY_SPAWN_CHANCE {
            let enemy = Enemy::spawn(&mut state.rng, state.viewport);
            state.enemies.push(enemy);
        }

        for enemy in &mut state.enemies {
            enemy.step(&env, &mut state.rng);
        }
        for laser in &mut state.lasers {
            laser.step(&env, &mut state.rng);
        }

        for hit in resolve_collisions(&mut state.lasers, &mut state.enemies) {
            state.mode.score += HIT_REWARD;
            events.push(SimEvent::EnemyDestroyed {
                pos: hit.pos,
                score: state.mode.score,
            });
        }

        retain_active(&mut state.enemies);
        retain_active(&mut state.lasers);
    } else if !state.mode.warp_mode && state.meteors_enabled {
        if !state.meteor.active && state.rng.random::<f32>() < METEOR_CHANCE {
            state.meteor.trigger(&mut state.rng, state.viewport);
            events.push(SimEvent::MeteorTriggered);
        }
        state.meteor.step(&env, &mut state.rng);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::combat::{Enemy, Laser};
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn new_state(seed: u64) -> SimState {
        SimState::new(seed, Vec2::new(1024.0, 768.0), &Settings::default())
    }

    fn parked_enemy(pos: Vec2) -> Enemy {
        Enemy {
            pos,
            speed: 0.0,
            size: ENEMY_SIZE,
            active: true,
            x_offset: 0.0,
        }
    }

    #[test]
    fn test_toggle_starts_combat_without_firing() {
        let mut state = new_state(1);
        let input = FrameInput {
            shots: vec![Vec2::new(100.0, 100.0)],
            toggle_combat: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, FRAME_MS);
        assert!(state.mode.game_active);
        assert!(state.lasers.is_empty());
        assert!(events.contains(&SimEvent::CombatStarted));
    }

    #[test]
    fn test_shot_spawns_laser_at_pointer() {
        let mut state = new_state(1);
        state.toggle_combat();
        let input = FrameInput {
            pointer: Some(Vec2::new(300.0, 500.0)),
            shots: vec![Vec2::new(300.0, 500.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.lasers.len(), 1);
        // Moved once in the same frame
        assert_eq!(state.lasers[0].pos, Vec2::new(300.0, 485.0));
    }

    #[test]
    fn test_each_click_fires_from_its_own_position() {
        let mut state = new_state(1);
        state.toggle_combat();
        let input = FrameInput {
            pointer: Some(Vec2::new(100.0, 500.0)),
            shots: vec![Vec2::new(600.0, 400.0), Vec2::new(100.0, 500.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        let origins: Vec<Vec2> = state.lasers.iter().map(|l| l.pos).collect();
        assert_eq!(
            origins,
            vec![Vec2::new(600.0, 385.0), Vec2::new(100.0, 485.0)]
        );
        assert_eq!(state.pointer, Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_hit_scores_once_and_cleans_up() {
        let mut state = new_state(2);
        state.toggle_combat();
        state.enemies.push(parked_enemy(Vec2::new(200.0, 185.0)));
        state.enemies.push(parked_enemy(Vec2::new(205.0, 185.0)));
        state.lasers.push(Laser::new(Vec2::new(200.0, 200.0)));

        let events = tick(&mut state, &FrameInput::default(), FRAME_MS);

        assert_eq!(state.mode.score, HIT_REWARD);
        let kills = events
            .iter()
            .filter(|e| matches!(e, SimEvent::EnemyDestroyed { .. }))
            .count();
        assert_eq!(kills, 1);
        assert!(state.lasers.is_empty());
        assert!(state.enemies.iter().all(|e| e.active));
    }

    #[test]
    fn test_no_dead_entities_survive_a_frame() {
        let mut state = new_state(3);
        state.toggle_combat();
        for i in 0..10 {
            state.lasers.push(Laser::new(Vec2::new(i as f32 * 50.0, 10.0 + i as f32)));
        }
        for _ in 0..120 {
            tick(&mut state, &FrameInput::default(), FRAME_MS);
            assert!(state.lasers.iter().all(|l| l.active));
            assert!(state.enemies.iter().all(|e| e.active));
        }
        assert!(state.lasers.is_empty());
    }

    #[test]
    fn test_enemies_eventually_spawn_in_combat() {
        let mut state = new_state(4);
        state.toggle_combat();
        let mut seen = false;
        for _ in 0..600 {
            tick(&mut state, &FrameInput::default(), FRAME_MS);
            seen |= !state.enemies.is_empty();
        }
        assert!(seen);
    }

    #[test]
    fn test_meteor_suspended_in_combat_and_warp() {
        let mut state = new_state(5);
        state.toggle_combat();
        for _ in 0..2000 {
            let events = tick(&mut state, &FrameInput::default(), FRAME_MS);
            assert!(!events.contains(&SimEvent::MeteorTriggered));
        }
        state.toggle_combat();
        state.engage_warp();
        for _ in 0..80 {
            let events = tick(&mut state, &FrameInput::default(), FRAME_MS);
            assert!(!events.contains(&SimEvent::MeteorTriggered));
        }
    }

    #[test]
    fn test_idle_meteor_eventually_triggers() {
        let mut state = new_state(6);
        let mut triggered = false;
        for _ in 0..5000 {
            let events = tick(&mut state, &FrameInput::default(), FRAME_MS);
            triggered |= events.contains(&SimEvent::MeteorTriggered);
        }
        assert!(triggered);
    }

    #[test]
    fn test_warp_round_trip_through_ticks() {
        let mut state = new_state(7);
        let engage = FrameInput {
            engage_warp: true,
            ..Default::default()
        };
        let events = tick(&mut state, &engage, FRAME_MS);
        assert!(events.contains(&SimEvent::WarpEngaged));

        // Second request mid-jump is ignored
        let events = tick(&mut state, &engage, FRAME_MS);
        assert!(!events.contains(&SimEvent::WarpEngaged));

        let mut disengaged = false;
        for _ in 0..100 {
            let events = tick(&mut state, &FrameInput::default(), FRAME_MS);
            disengaged |= events
                .iter()
                .any(|e| matches!(e, SimEvent::WarpDisengaged { .. }));
        }
        assert!(disengaged);
        assert!(!state.mode.warp_mode);
        assert_eq!(state.mode.speed_multiplier, IDLE_SPEED);
    }

    #[test]
    fn test_determinism() {
        let mut a = new_state(99999);
        let mut b = new_state(99999);
        let inputs = [
            FrameInput {
                toggle_combat: true,
                ..Default::default()
            },
            FrameInput {
                pointer: Some(Vec2::new(500.0, 700.0)),
                shots: vec![Vec2::new(480.0, 700.0), Vec2::new(500.0, 700.0)],
                ..Default::default()
            },
            FrameInput {
                engage_warp: true,
                ..Default::default()
            },
            FrameInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, FRAME_MS);
                tick(&mut b, input, FRAME_MS);
            }
        }
        assert_eq!(a.mode, b.mode);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert!(a.stars.iter().zip(&b.stars).all(|(x, y)| x.pos == y.pos));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_idle_stars_stay_bounded(seed in any::<u64>(), frames in 1usize..400) {
            let mut state = SimState::new(seed, Vec2::new(640.0, 480.0), &Settings::default());
            for _ in 0..frames {
                tick(&mut state, &FrameInput::default(), FRAME_MS);
            }
            let (w, h) = (state.viewport.x, state.viewport.y);
            for star in &state.stars {
                prop_assert!(star.pos.x >= -w / 2.0 && star.pos.x <= 1.5 * w);
                prop_assert!(star.pos.y >= -h / 2.0 && star.pos.y <= 1.5 * h);
            }
        }

        #[test]
        fn prop_combat_toggle_always_resets(seed in any::<u64>(), frames in 0usize..200) {
            let mut state = new_state(seed);
            state.toggle_combat();
            for i in 0..frames {
                let at = Vec2::new((i * 37 % 1024) as f32, 700.0);
                let input = FrameInput {
                    pointer: Some(at),
                    shots: if i % 3 == 0 { vec![at] } else { Vec::new() },
                    ..Default::default()
                };
                tick(&mut state, &input, FRAME_MS);
            }
            state.toggle_combat();
            state.toggle_combat();
            prop_assert_eq!(state.mode.score, 0);
            prop_assert!(state.enemies.is_empty());
            prop_assert!(state.lasers.is_empty());
        }
    }
}
