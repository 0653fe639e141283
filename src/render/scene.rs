//! Whole-frame composition in fixed draw order

use super::DrawCmd;
use super::shapes::{Render, crosshair, hud};
use crate::settings::Settings;
use crate::sim::SimState;

/// Build the draw list for the current state
///
/// Order: clear, stars, then combat (enemies, lasers, HUD, crosshair) or the
/// idle meteor.
pub fn compose(state: &SimState, settings: &Settings) -> Vec<DrawCmd> {
    let env = state.step_env();
    let mut out = Vec::with_capacity(state.stars.len() + state.enemies.len() * 5 + 16);

    out.push(DrawCmd::Clear {
        size: state.viewport,
    });

    for star in &state.stars {
        star.draw(&env, &mut out);
    }

    if state.mode.game_active {
        for enemy in &state.enemies {
            enemy.draw(&env, &mut out);
        }
        for laser in &state.lasers {
            laser.draw(&env, &mut out);
        }
        if settings.show_hud {
            hud(state.mode.score, &mut out);
        }
        if settings.show_crosshair {
            crosshair(state.pointer, &mut out);
        }
    } else if !state.mode.warp_mode {
        state.meteor.draw(&env, &mut out);
    }

    out
}
