//! Canvas 2D backend

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::DrawCmd;

/// Replay a frame's draw list onto the canvas
pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) {
    for cmd in cmds {
        draw(ctx, cmd);
    }
}

fn draw(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Clear { size } => {
            ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        }
        DrawCmd::FillCircle {
            center,
            radius,
            color,
        } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.begin_path();
            // Negative radii throw IndexSizeError; shapes already clamp them
            let _ = ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        DrawCmd::StrokeCircle {
            center,
            radius,
            width,
            color,
        } => {
            ctx.set_stroke_style_str(&color.to_css());
            ctx.set_line_width(*width as f64);
            ctx.begin_path();
            let _ = ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                TAU,
            );
            ctx.stroke();
        }
        DrawCmd::Line {
            from,
            to,
            width,
            color,
            glow,
        } => {
            if let Some(glow) = glow {
                ctx.set_shadow_blur(glow.blur as f64);
                ctx.set_shadow_color(&glow.color.to_css());
            }
            ctx.set_stroke_style_str(&color.to_css());
            ctx.set_line_width(*width as f64);
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(to.x as f64, to.y as f64);
            ctx.stroke();
            if glow.is_some() {
                ctx.set_shadow_blur(0.0);
            }
        }
        DrawCmd::GradientLine {
            from,
            to,
            width,
            start,
            end,
        } => {
            let gradient =
                ctx.create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
            let _ = gradient.add_color_stop(0.0, &start.to_css());
            let _ = gradient.add_color_stop(1.0, &end.to_css());
            ctx.set_stroke_style_canvas_gradient(&gradient);
            ctx.set_line_width(*width as f64);
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(to.x as f64, to.y as f64);
            ctx.stroke();
        }
        DrawCmd::Text {
            text,
            pos,
            font,
            color,
        } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.set_font(font);
            let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }
}
