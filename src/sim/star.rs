//! Background particles: drifting stars and the idle meteor

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Simulate, StepEnv};
use crate::consts::*;
use crate::wrap_drift;

/// A background star
///
/// Idle stars live in a drift space of `[-w/2, w/2)`; warp moves them in
/// screen space away from the canvas center.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Depth (0 = nearest). Grows without bound during warp until reset.
    pub z: f32,
    pub size: f32,
    /// Twinkle phase accumulator, consumed through `sin`
    pub opacity: f32,
    pub twinkle_speed: f32,
}

impl Star {
    pub fn new(rng: &mut Pcg32, viewport: Vec2) -> Self {
        let mut star = Self {
            pos: Vec2::ZERO,
            z: 0.0,
            size: 0.0,
            opacity: 0.0,
            twinkle_speed: TWINKLE_MIN,
        };
        star.reset(rng, viewport);
        star
    }

    /// Re-roll every field (position in drift space)
    pub fn reset(&mut self, rng: &mut Pcg32, viewport: Vec2) {
        self.pos = Vec2::new(
            rng.random::<f32>() * viewport.x - viewport.x / 2.0,
            rng.random::<f32>() * viewport.y - viewport.y / 2.0,
        );
        self.z = rng.random::<f32>() * MAX_DEPTH;
        self.size = rng.random::<f32>() * MAX_STAR_SIZE;
        self.opacity = rng.random::<f32>();
        self.twinkle_speed = TWINKLE_MIN + rng.random::<f32>() * TWINKLE_SPREAD;
    }

    fn step_warp(&mut self, env: &StepEnv, rng: &mut Pcg32) {
        let delta = self.pos - env.center();
        let dist = delta.length().max(1.0);

        self.pos += delta / dist * self.z * WARP_DISPLACEMENT * env.speed_multiplier;
        self.z += WARP_DEPTH_STEP;

        let out_of_bounds = self.pos.x < 0.0
            || self.pos.x > env.viewport.x
            || self.pos.y < 0.0
            || self.pos.y > env.viewport.y;
        if out_of_bounds {
            // Fresh star streaking out of the vanishing point
            self.reset(rng, env.viewport);
            let jitter = Vec2::new(
                rng.random::<f32>() * 2.0 * WARP_RESPAWN_JITTER - WARP_RESPAWN_JITTER,
                rng.random::<f32>() * 2.0 * WARP_RESPAWN_JITTER - WARP_RESPAWN_JITTER,
            );
            self.pos = env.center() + jitter;
            self.z = WARP_RESPAWN_DEPTH;
        }
    }

    fn step_idle(&mut self, env: &StepEnv) {
        let depth_factor = DRIFT_DEPTH_BASE - self.z;
        self.pos.x -= DRIFT_X * depth_factor;
        self.pos.y -= DRIFT_Y * depth_factor;

        self.pos.x = wrap_drift(self.pos.x, env.viewport.x);
        self.pos.y = wrap_drift(self.pos.y, env.viewport.y);
    }
}

impl Simulate for Star {
    fn step(&mut self, env: &StepEnv, rng: &mut Pcg32) {
        if env.warp_mode {
            self.step_warp(env, rng);
        } else {
            self.step_idle(env);
        }
        self.opacity += self.twinkle_speed;
    }
}

/// The idle-mode shooting star (a single reused instance)
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub active: bool,
    pub pos: Vec2,
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
    pub life: u32,
    pub max_life: u32,
}

impl ShootingStar {
    pub fn new(rng: &mut Pcg32, viewport: Vec2) -> Self {
        let mut meteor = Self {
            active: false,
            pos: Vec2::ZERO,
            dx: 0.0,
            dy: 0.0,
            speed: 0.0,
            life: 0,
            max_life: METEOR_MAX_LIFE,
        };
        meteor.reset(rng, viewport);
        meteor
    }

    pub fn reset(&mut self, rng: &mut Pcg32, viewport: Vec2) {
        self.pos = Vec2::new(rng.random::<f32>() * viewport.x, 0.0);
        self.speed = rng.random::<f32>() * 10.0 + 6.0;
        self.dx = -2.0 - rng.random::<f32>() * 4.0;
        self.dy = self.speed;
        self.life = 0;
        self.max_life = METEOR_MAX_LIFE;
        self.active = false;
    }

    /// Launch from above the top edge, offset past the right
    pub fn trigger(&mut self, rng: &mut Pcg32, viewport: Vec2) {
        self.reset(rng, viewport);
        self.active = true;
        self.pos = Vec2::new(
            rng.random::<f32>() * viewport.x + METEOR_SPAWN_OFFSET_X,
            METEOR_SPAWN_Y,
        );
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// Far end of the fading tail
    pub fn tail(&self) -> Vec2 {
        self.pos - self.velocity() * METEOR_TAIL_FRAMES
    }
}

impl Simulate for ShootingStar {
    fn step(&mut self, env: &StepEnv, _rng: &mut Pcg32) {
        if !self.active {
            return;
        }

        self.pos += self.velocity();
        self.life += 1;

        if self.life > self.max_life || self.pos.x < 0.0 || self.pos.y > env.viewport.y {
            self.active = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
