//! Simulation state
//!
//! Everything the frame loop mutates lives in one struct that is passed
//! explicitly into every update; there is no global mutable state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{Schedule, SimClock};
use super::combat::{Enemy, Laser};
use super::entity::StepEnv;
use super::mode::ModeState;
use super::star::{ShootingStar, Star};
use crate::settings::Settings;

/// Complete simulation state (single owner: the frame loop)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Canvas size in pixels
    pub viewport: Vec2,
    pub clock: SimClock,
    /// Pending timers (warp ramp, warp disengage)
    pub schedule: Schedule,
    pub mode: ModeState,
    /// Fixed star pool
    pub stars: Vec<Star>,
    /// Idle shooting star
    pub meteor: ShootingStar,
    /// Live enemies (insertion order)
    pub enemies: Vec<Enemy>,
    /// Live lasers (insertion order)
    pub lasers: Vec<Laser>,
    /// Last known pointer position
    pub pointer: Vec2,
    /// Whether idle meteors may spawn
    pub meteors_enabled: bool,
    pub rng: Pcg32,
}

impl SimState {
    /// Create a state with the configured star pool
    pub fn new(seed: u64, viewport: Vec2, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let viewport = sanitize_viewport(viewport).unwrap_or(Vec2::ONE);

        let stars = (0..settings.star_count())
            .map(|_| Star::new(&mut rng, viewport))
            .collect();
        let meteor = ShootingStar::new(&mut rng, viewport);

        Self {
            seed,
            viewport,
            clock: SimClock::default(),
            schedule: Schedule::default(),
            mode: ModeState::default(),
            stars,
            meteor,
            enemies: Vec::new(),
            lasers: Vec::new(),
            pointer: Vec2::ZERO,
            meteors_enabled: settings.meteors,
            rng,
        }
    }

    pub fn center(&self) -> Vec2 {
        crate::viewport_center(self.viewport)
    }

    /// Frame context for entity steps
    pub fn step_env(&self) -> StepEnv {
        StepEnv {
            viewport: self.viewport,
            warp_mode: self.mode.warp_mode,
            speed_multiplier: self.mode.speed_multiplier,
        }
    }

    /// Adopt a new canvas size; stars keep their coordinates
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(viewport) = sanitize_viewport(Vec2::new(width, height)) {
            self.viewport = viewport;
        }
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.pointer = pos;
        }
    }

    /// Fire a laser from a click position; only while combat is active
    pub fn fire(&mut self, at: Vec2) -> bool {
        if !self.mode.game_active || !at.is_finite() {
            return false;
        }
        self.lasers.push(Laser::new(at));
        true
    }
}

fn sanitize_viewport(viewport: Vec2) -> Option<Vec2> {
    (viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0).then_some(viewport)
}
