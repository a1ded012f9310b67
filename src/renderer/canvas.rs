//! Canvas 2D backend
//!
//! Individual canvas calls that fail (bad gradient stop, arc on a detached
//! context) only lose that shape for the frame.

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::surface::{DrawSurface, Fill, Rgba, css_color};

fn circle_path(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f32) -> bool {
    ctx.begin_path();
    ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
        .is_ok()
}

impl DrawSurface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.begin_path();
        self.move_to(from.x as f64, from.y as f64);
        self.line_to(to.x as f64, to.y as f64);
        self.set_stroke_style_str(&css_color(color));
        self.set_line_width(width as f64);
        self.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        if radius <= 0.0 || !circle_path(self, center, radius) {
            return;
        }
        match fill {
            Fill::Solid(color) => self.set_fill_style_str(&css_color(*color)),
            Fill::Radial(stops) => {
                let (x, y) = (center.x as f64, center.y as f64);
                let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius as f64)
                else {
                    return;
                };
                for (offset, color) in stops {
                    let _ = gradient.add_color_stop(offset.clamp(0.0, 1.0), &css_color(*color));
                }
                self.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        if radius <= 0.0 || !circle_path(self, center, radius) {
            return;
        }
        self.set_stroke_style_str(&css_color(color));
        self.set_line_width(width as f64);
        self.stroke();
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.set_shadow_blur(blur as f64);
        self.set_shadow_color(&css_color(color));
    }

    fn clear_shadow(&mut self) {
        self.set_shadow_blur(0.0);
        self.set_shadow_color("transparent");
    }
}
