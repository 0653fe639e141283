//! Datapad Starfield - animated starfield backdrop with a combat minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stars, meteor, enemies, lasers, modes)
//! - `render`: Immediate-mode 2D draw commands and the canvas backend
//! - `nav`: Link classification and eased in-page scrolling
//! - `effects`: DOM embellishments (text scramble, flicker, card tilt)
//! - `settings`: User preferences persisted in LocalStorage

pub mod effects;
pub mod error;
pub mod nav;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
///
/// Motion constants are per frame; durations are in milliseconds.
pub mod consts {
    /// Default star pool size
    pub const STAR_COUNT: usize = 800;
    /// Star depth range [0, MAX_DEPTH) at spawn
    pub const MAX_DEPTH: f32 = 4.0;
    /// Star size range [0, MAX_STAR_SIZE)
    pub const MAX_STAR_SIZE: f32 = 2.0;
    /// Twinkle speed range
    pub const TWINKLE_MIN: f32 = 0.02;
    pub const TWINKLE_SPREAD: f32 = 0.05;

    /// Idle drift per depth unit
    pub const DRIFT_X: f32 = 0.05;
    pub const DRIFT_Y: f32 = 0.01;
    /// Nearest depth factor (depth_factor = DRIFT_DEPTH_BASE - z)
    pub const DRIFT_DEPTH_BASE: f32 = 5.0;

    /// Warp: outward displacement per unit depth and multiplier
    pub const WARP_DISPLACEMENT: f32 = 10.0;
    /// Warp: depth gained per frame
    pub const WARP_DEPTH_STEP: f32 = 0.1;
    /// Warp: depth of a star respawned at the vanishing point
    pub const WARP_RESPAWN_DEPTH: f32 = 0.1;
    /// Warp: respawn jitter around center (±)
    pub const WARP_RESPAWN_JITTER: f32 = 100.0;
    /// Warp: streak length factor
    pub const WARP_STREAK: f32 = 0.05;
    /// Warp: multiplier above which streaks get thicker
    pub const WARP_THICK_THRESHOLD: f32 = 2.0;
    pub const WARP_THICK_SCALE: f32 = 1.5;

    /// Speed multiplier when no jump is in progress
    pub const IDLE_SPEED: f32 = 0.05;
    /// Speed multiplier at the start of a jump
    pub const WARP_START_SPEED: f32 = 2.0;
    /// Ramp increment and period
    pub const WARP_RAMP_STEP: f32 = 0.5;
    pub const WARP_RAMP_PERIOD_MS: f64 = 100.0;
    /// Ramp stops once the multiplier exceeds this
    pub const WARP_RAMP_CEILING: f32 = 5.0;
    /// Jump length
    pub const WARP_DURATION_MS: f64 = 1500.0;
    /// Stars closer than this to center are scattered after a jump
    pub const REFORM_RADIUS: f32 = 250.0;
    /// Attempts to land a scattered star outside REFORM_RADIUS
    pub const REFORM_ATTEMPTS: u32 = 8;

    /// Meteor trigger chance per idle frame
    pub const METEOR_CHANCE: f32 = 0.005;
    pub const METEOR_MAX_LIFE: u32 = 100;
    /// Meteor tail length in frames of travel
    pub const METEOR_TAIL_FRAMES: f32 = 5.0;
    /// Horizontal offset of a triggered meteor past the right edge
    pub const METEOR_SPAWN_OFFSET_X: f32 = 200.0;
    pub const METEOR_SPAWN_Y: f32 = -50.0;

    /// Enemy spawn chance per combat frame
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.02;
    pub const ENEMY_MIN_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 3.0;
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SWAY_AMPLITUDE: f32 = 2.0;
    pub const ENEMY_SWAY_FREQUENCY: f32 = 0.01;
    pub const ENEMY_PHASE_RANGE: f32 = 100.0;
    /// Distance above the top / below the bottom where enemies spawn / despawn
    pub const ENEMY_MARGIN: f32 = 50.0;

    pub const LASER_SPEED: f32 = 15.0;
    pub const LASER_LENGTH: f32 = 20.0;

    /// Laser/enemy hit distance
    pub const HIT_RADIUS: f32 = 20.0;
    /// Score per destroyed enemy
    pub const HIT_REWARD: u64 = 100;

    /// In-page anchor scroll duration
    pub const SCROLL_DURATION_MS: f64 = 1500.0;
}

/// Center of a viewport
#[inline]
pub fn viewport_center(viewport: Vec2) -> Vec2 {
    viewport * 0.5
}

/// Wrap a drifting coordinate back into `[-extent/2, 3*extent/2]`
///
/// Crossing the low edge reappears one extent later; the high edge only
/// matters after the viewport shrinks.
#[inline]
pub fn wrap_drift(value: f32, extent: f32) -> f32 {
    if value < -extent / 2.0 {
        value + extent
    } else if value > extent * 1.5 {
        value - extent
    } else {
        value
    }
}

/// Map a drift coordinate onto the visible range for drawing
#[inline]
pub fn wrap_for_draw(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        value + extent
    } else if value > extent {
        value - extent
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_drift_moves_low_values_up_one_extent() {
        assert_eq!(wrap_drift(-501.0, 1000.0), 499.0);
        assert_eq!(wrap_drift(-499.0, 1000.0), -499.0);
        assert_eq!(wrap_drift(1600.0, 1000.0), 600.0);
    }

    #[test]
    fn wrap_for_draw_lands_on_screen() {
        assert_eq!(wrap_for_draw(-10.0, 800.0), 790.0);
        assert_eq!(wrap_for_draw(810.0, 800.0), 10.0);
        assert_eq!(wrap_for_draw(400.0, 800.0), 400.0);
    }
}
