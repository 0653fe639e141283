//! Mode controller: combat toggle and hyperspace jumps
//!
//! Combat and warp are independent flags; both may be set at once.

use glam::Vec2;
use rand::Rng;

use super::clock::TaskKind;
use super::event::SimEvent;
use super::state::SimState;
use crate::consts::*;

/// Global mode flags
#[derive(Debug, Clone, PartialEq)]
pub struct ModeState {
    /// Combat minigame running
    pub game_active: bool,
    pub score: u64,
    /// Hyperspace jump in progress
    pub warp_mode: bool,
    pub speed_multiplier: f32,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            game_active: false,
            score: 0,
            warp_mode: false,
            speed_multiplier: IDLE_SPEED,
        }
    }
}

impl SimState {
    /// Flip combat mode; entering starts a fresh round, leaving discards it
    pub fn toggle_combat(&mut self) -> SimEvent {
        self.mode.game_active = !self.mode.game_active;
        if self.mode.game_active {
            self.mode.score = 0;
            self.enemies.clear();
            self.lasers.clear();
            SimEvent::CombatStarted
        } else {
            self.enemies.clear();
            self.lasers.clear();
            SimEvent::CombatEnded {
                score: self.mode.score,
            }
        }
    }

    /// Start a hyperspace jump; returns false if one is already running
    pub fn engage_warp(&mut self) -> bool {
        if self.mode.warp_mode {
            return false;
        }

        self.mode.warp_mode = true;
        self.mode.speed_multiplier = WARP_START_SPEED;

        let now = self.clock.now_ms;
        self.schedule
            .schedule_every(TaskKind::WarpRamp, now, WARP_RAMP_PERIOD_MS);
        self.schedule
            .schedule_once(TaskKind::WarpDisengage, now + WARP_DURATION_MS);
        log::debug!("warp engaged at {:.0}ms", now);
        true
    }

    /// One ramp tick; the ramp cancels itself past the ceiling
    pub fn ramp_warp(&mut self) {
        self.mode.speed_multiplier += WARP_RAMP_STEP;
        if self.mode.speed_multiplier > WARP_RAMP_CEILING {
            self.schedule.cancel(TaskKind::WarpRamp);
        }
    }

    /// End the jump and re-form the field around the center
    ///
    /// Returns how many stars were scattered out of the center.
    pub fn disengage_warp(&mut self) -> usize {
        self.mode.warp_mode = false;
        self.mode.speed_multiplier = IDLE_SPEED;
        self.schedule.cancel(TaskKind::WarpRamp);

        let center = self.center();
        let viewport = self.viewport;
        let rng = &mut self.rng;
        let mut relocated = 0;

        for star in &mut self.stars {
            if star.pos.distance(center) < REFORM_RADIUS {
                let mut pos = random_point(rng, viewport);
                for _ in 1..REFORM_ATTEMPTS {
                    if pos.distance(center) >= REFORM_RADIUS {
                        break;
                    }
                    pos = random_point(rng, viewport);
                }
                star.pos = pos;
                star.z = rng.random::<f32>() * MAX_DEPTH;
                relocated += 1;
            } else if !(0.0..=MAX_DEPTH).contains(&star.z) {
                // Depth left over from the jump
                star.z = rng.random::<f32>() * MAX_DEPTH;
            }
        }

        log::debug!("warp disengaged, {} stars re-formed", relocated);
        relocated
    }

    /// Run every timer that is due at the current clock time
    pub fn run_due_tasks(&mut self, events: &mut Vec<SimEvent>) {
        while let Some(kind) = self.schedule.pop_due(self.clock.now_ms) {
            match kind {
                TaskKind::WarpRamp => self.ramp_warp(),
                TaskKind::WarpDisengage => {
                    let relocated = self.disengage_warp();
                    events.push(SimEvent::WarpDisengaged { relocated });
                }
            }
        }
    }
}

fn random_point(rng: &mut impl Rng, viewport: Vec2) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * viewport.x,
        rng.random::<f32>() * viewport.y,
    )
}
