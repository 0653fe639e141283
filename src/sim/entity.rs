//! Shared per-frame contract for simulated entities

use glam::Vec2;
use rand_pcg::Pcg32;

/// Read-only frame context handed to every entity step
///
/// Carries the mode flags the entities react to, so nothing reads global state.
#[derive(Debug, Clone, Copy)]
pub struct StepEnv {
    /// Canvas size in pixels
    pub viewport: Vec2,
    /// Hyperspace jump in progress
    pub warp_mode: bool,
    /// Current warp speed multiplier
    pub speed_multiplier: f32,
}

impl StepEnv {
    pub fn center(&self) -> Vec2 {
        crate::viewport_center(self.viewport)
    }
}

/// One simulation step per frame
pub trait Simulate {
    fn step(&mut self, env: &StepEnv, rng: &mut Pcg32);

    /// Inactive entities are dropped from their live collection at end of frame
    fn is_active(&self) -> bool {
        true
    }
}
