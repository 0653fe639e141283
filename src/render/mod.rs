//! Immediate-mode 2D rendering
//!
//! The scene is described as a flat list of draw commands; the canvas
//! backend replays them onto a `CanvasRenderingContext2d` each frame.

pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::compose;
pub use shapes::Render;

use glam::Vec2;

/// RGBA color with a float alpha, as CSS expects it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with alpha clamped to [0, 1]
    pub fn with_alpha(self, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Shadow glow applied to a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color,
}

/// A single immediate-mode drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface
    Clear { size: Vec2 },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        glow: Option<Glow>,
    },
    /// Line whose color fades linearly from `from` to `to`
    GradientLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        start: Color,
        end: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        color: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(Color::RED.to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Color::GREEN.with_alpha(3.0).a, 1.0);
        assert_eq!(Color::GREEN.with_alpha(-1.0).a, 0.0);
        assert_eq!(Color::GREEN.with_alpha(f32::NAN).a, 0.0);
    }
}
