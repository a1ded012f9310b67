//! Drawing surface abstraction
//!
//! The scene renderer only issues these primitives. The browser implements
//! them on a 2D canvas context; tests and the headless binary record them.

use glam::Vec2;

/// Linear RGBA, components in 0-1
pub type Rgba = [f32; 4];

/// Return `color` with its alpha multiplied by `factor`
#[inline]
pub fn with_alpha(color: Rgba, factor: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * factor.clamp(0.0, 1.0)]
}

/// CSS `rgba()` string for a color
pub fn css_color(color: Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// How a circle is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Radial gradient centered on the circle, stops at 0-1 of its radius
    Radial(Vec<(f32, Rgba)>),
}

/// A 2D surface the renderer can draw on
pub trait DrawSurface {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32);
    /// Blurred glow applied to subsequent fills until `clear_shadow`
    fn set_shadow(&mut self, blur: f32, color: Rgba);
    fn clear_shadow(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        fill: Fill,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        width: f32,
    },
    Shadow {
        blur: f32,
        color: Rgba,
    },
    ClearShadow,
}

/// Surface that keeps every draw call for later inspection
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's commands
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, &Fill)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                fill,
            } => Some((*center, *radius, fill)),
            _ => None,
        })
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            fill: fill.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.commands.push(DrawCommand::Shadow { blur, color });
    }

    fn clear_shadow(&mut self) {
        self.commands.push(DrawCommand::ClearShadow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.5, 0.25]), "rgba(255,0,128,0.250)");
        assert_eq!(css_color([2.0, -1.0, 0.0, 3.0]), "rgba(255,0,0,1.000)");
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha([1.0, 1.0, 1.0, 0.5], 0.5), [1.0, 1.0, 1.0, 0.25]);
        assert_eq!(with_alpha([1.0, 1.0, 1.0, 0.5], -3.0)[3], 0.0);
    }

    #[test]
    fn test_recorder_counts() {
        let mut rec = CommandRecorder::new();
        rec.clear(10.0, 10.0);
        rec.line(Vec2::ZERO, Vec2::ONE, [1.0; 4], 1.0);
        rec.fill_circle(Vec2::ONE, 2.0, &Fill::Solid([1.0; 4]));
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.lines(), 1);
        assert_eq!(rec.circles().count(), 1);
        rec.reset();
        assert!(rec.is_empty());
    }
}
