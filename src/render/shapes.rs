//! Draw command generation for simulation entities

use glam::Vec2;

use super::{Color, DrawCmd, Glow};
use crate::consts::*;
use crate::sim::{Enemy, Laser, ShootingStar, StepEnv, Star};
use crate::wrap_for_draw;

/// Emit the draw commands for one entity
pub trait Render {
    fn draw(&self, env: &StepEnv, out: &mut Vec<DrawCmd>);
}

impl Render for Star {
    fn draw(&self, env: &StepEnv, out: &mut Vec<DrawCmd>) {
        if env.warp_mode {
            // Streak back toward the vanishing point
            let tail = self.pos - (self.pos - env.center()) * (WARP_STREAK * env.speed_multiplier);
            let thickness = if env.speed_multiplier > WARP_THICK_THRESHOLD {
                WARP_THICK_SCALE
            } else {
                1.0
            };
            out.push(DrawCmd::Line {
                from: self.pos,
                to: tail,
                width: self.size * thickness,
                color: Color::WHITE.with_alpha(self.opacity),
                glow: None,
            });
        } else {
            let center = Vec2::new(
                wrap_for_draw(self.pos.x, env.viewport.x),
                wrap_for_draw(self.pos.y, env.viewport.y),
            );
            let flicker = (self.opacity.sin() + 1.0) / 2.0 * 0.8;
            let alpha = flicker * (1.0 - self.z / MAX_DEPTH);
            let radius = (self.size * (1.0 - self.z / DRIFT_DEPTH_BASE)).max(0.0);
            out.push(DrawCmd::FillCircle {
                center,
                radius,
                color: Color::WHITE.with_alpha(alpha),
            });
        }
    }
}

impl Render for ShootingStar {
    fn draw(&self, _env: &StepEnv, out: &mut Vec<DrawCmd>) {
        if !self.active {
            return;
        }
        out.push(DrawCmd::GradientLine {
            from: self.pos,
            to: self.tail(),
            width: 2.0,
            start: Color::WHITE,
            end: Color::WHITE.with_alpha(0.0),
        });
    }
}

impl Render for Enemy {
    fn draw(&self, _env: &StepEnv, out: &mut Vec<DrawCmd>) {
        if !self.active {
            return;
        }

        let p = self.pos;
        let line = |from: Vec2, to: Vec2| DrawCmd::Line {
            from,
            to,
            width: 2.0,
            color: Color::RED,
            glow: None,
        };

        out.push(DrawCmd::StrokeCircle {
            center: p,
            radius: 8.0,
            width: 2.0,
            color: Color::RED,
        });
        // Wings
        out.push(line(p + Vec2::new(-15.0, -15.0), p + Vec2::new(-15.0, 15.0)));
        out.push(line(p + Vec2::new(15.0, -15.0), p + Vec2::new(15.0, 15.0)));
        // Struts
        out.push(line(p + Vec2::new(-8.0, 0.0), p + Vec2::new(-15.0, 0.0)));
        out.push(line(p + Vec2::new(8.0, 0.0), p + Vec2::new(15.0, 0.0)));
    }
}

impl Render for Laser {
    fn draw(&self, _env: &StepEnv, out: &mut Vec<DrawCmd>) {
        if !self.active {
            return;
        }
        out.push(DrawCmd::Line {
            from: self.pos,
            to: self.pos + Vec2::new(0.0, LASER_LENGTH),
            width: 3.0,
            color: Color::GREEN,
            glow: Some(Glow {
                blur: 10.0,
                color: Color::GREEN,
            }),
        });
    }
}

/// Score readout
pub fn hud(score: u64, out: &mut Vec<DrawCmd>) {
    const FONT: &str = "20px Orbitron";
    out.push(DrawCmd::Text {
        text: format!("SCORE: {}", score),
        pos: Vec2::new(20.0, 40.0),
        font: FONT,
        color: Color::RED,
    });
    out.push(DrawCmd::Text {
        text: "SYSTEM: COMBAT SIMULATION".to_string(),
        pos: Vec2::new(20.0, 70.0),
        font: FONT,
        color: Color::RED,
    });
}

/// Targeting reticle at the pointer
pub fn crosshair(at: Vec2, out: &mut Vec<DrawCmd>) {
    let color = Color::GREEN.with_alpha(0.5);
    out.push(DrawCmd::StrokeCircle {
        center: at,
        radius: 20.0,
        width: 2.0,
        color,
    });
    for (from, to) in [
        (Vec2::new(-25.0, 0.0), Vec2::new(25.0, 0.0)),
        (Vec2::new(0.0, -25.0), Vec2::new(0.0, 25.0)),
    ] {
        out.push(DrawCmd::Line {
            from: at + from,
            to: at + to,
            width: 2.0,
            color,
            glow: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(warp: bool, speed: f32) -> StepEnv {
        StepEnv {
            viewport: Vec2::new(1000.0, 800.0),
            warp_mode: warp,
            speed_multiplier: speed,
        }
    }

    fn star(pos: Vec2, z: f32) -> Star {
        Star {
            pos,
            z,
            size: 2.0,
            opacity: 0.0,
            twinkle_speed: 0.05,
        }
    }

    #[test]
    fn test_idle_star_draws_wrapped_dot() {
        let mut out = Vec::new();
        star(Vec2::new(-100.0, -50.0), 0.0).draw(&env(false, IDLE_SPEED), &mut out);
        match &out[0] {
            DrawCmd::FillCircle { center, radius, color } => {
                assert_eq!(*center, Vec2::new(900.0, 750.0));
                assert_eq!(*radius, 2.0);
                // sin(0) -> 0.4 flicker at depth 0
                assert!((color.a - 0.4).abs() < 1e-6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_far_star_is_dimmer_and_smaller() {
        let mut near = Vec::new();
        let mut far = Vec::new();
        star(Vec2::ZERO, 0.5).draw(&env(false, IDLE_SPEED), &mut near);
        star(Vec2::ZERO, 3.5).draw(&env(false, IDLE_SPEED), &mut far);
        let DrawCmd::FillCircle {
            radius: rn,
            color: cn,
            ..
        } = &near[0]
        else {
            panic!("expected circle");
        };
        let DrawCmd::FillCircle {
            radius: rf,
            color: cf,
            ..
        } = &far[0]
        else {
            panic!("expected circle");
        };
        assert!(rf < rn);
        assert!(cf.a < cn.a);
    }

    #[test]
    fn test_deep_star_radius_never_negative() {
        let mut out = Vec::new();
        star(Vec2::ZERO, 12.0).draw(&env(false, IDLE_SPEED), &mut out);
        let DrawCmd::FillCircle { radius, color, .. } = &out[0] else {
            panic!("expected circle");
        };
        assert_eq!(*radius, 0.0);
        assert_eq!(color.a, 0.0);
    }

    #[test]
    fn test_warp_streak_points_at_center() {
        let mut out = Vec::new();
        star(Vec2::new(700.0, 400.0), 1.0).draw(&env(true, 4.0), &mut out);
        let DrawCmd::Line { from, to, width, .. } = &out[0] else {
            panic!("expected streak");
        };
        assert_eq!(*from, Vec2::new(700.0, 400.0));
        // 200 * 0.05 * 4 = 40 back toward center
        assert!((to.x - 660.0).abs() < 1e-3);
        assert_eq!(*width, 3.0);
    }

    #[test]
    fn test_slow_warp_uses_plain_width() {
        let mut out = Vec::new();
        star(Vec2::new(700.0, 400.0), 1.0).draw(&env(true, 2.0), &mut out);
        let DrawCmd::Line { width, .. } = &out[0] else {
            panic!("expected streak");
        };
        assert_eq!(*width, 2.0);
    }

    #[test]
    fn test_inactive_entities_draw_nothing() {
        let mut out = Vec::new();
        let laser = Laser {
            pos: Vec2::ZERO,
            active: false,
        };
        laser.draw(&env(false, IDLE_SPEED), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_enemy_silhouette() {
        let enemy = Enemy {
            pos: Vec2::new(100.0, 100.0),
            speed: 2.0,
            size: ENEMY_SIZE,
            active: true,
            x_offset: 0.0,
        };
        let mut out = Vec::new();
        enemy.draw(&env(false, IDLE_SPEED), &mut out);
        assert_eq!(out.len(), 5);
        assert!(matches!(out[0], DrawCmd::StrokeCircle { radius, .. } if radius == 8.0));
    }

    #[test]
    fn test_hud_text() {
        let mut out = Vec::new();
        hud(1200, &mut out);
        assert!(matches!(&out[0], DrawCmd::Text { text, .. } if text == "SCORE: 1200"));
    }
}
