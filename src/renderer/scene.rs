//! Scene rendering
//!
//! Draws one frame of the simulation back to front: grid, trail, ball,
//! paddle, particles.

use glam::Vec2;

use super::palette::Palette;
use super::surface::{DrawSurface, Fill, with_alpha};
use crate::consts::GRID_SPACING;
use crate::settings::{Settings, Theme};
use crate::sim::{Ball, CollisionEffect, Dimensions, Paddle, SimState};

/// Peak opacity of the oldest-to-newest trail fade
const TRAIL_ALPHA: f32 = 0.5;
/// Shadow blur for the ball core
const BALL_SHADOW_BLUR: f32 = 20.0;
/// Glow halo radius as a multiple of the ball radius
const BALL_HALO_SCALE: f32 = 2.5;

/// Draws `SimState` onto any `DrawSurface`
#[derive(Debug, Clone)]
pub struct Renderer {
    pub palette: Palette,
    pub grid: bool,
    pub trails: bool,
    pub particles: bool,
    pub glow: bool,
    pub shadow_glow: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&Settings::default(), Theme::default())
    }
}

impl Renderer {
    pub fn new(settings: &Settings, theme: Theme) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            grid: settings.grid,
            trails: settings.effective_trails(),
            particles: settings.effective_particles(),
            glow: settings.glow,
            shadow_glow: settings.effective_shadow_glow(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
    }

    /// Draw the current frame
    ///
    /// Clears the surface even when the ball has not spawned yet.
    pub fn render<S: DrawSurface + ?Sized>(&self, state: &SimState, surface: &mut S) {
        let dims = state.dims;
        if dims.is_empty() {
            return;
        }
        surface.clear(dims.width, dims.height);

        if self.grid {
            self.draw_grid(&dims, surface);
        }

        let Some(ball) = state.ball.as_ref() else {
            return;
        };

        if self.trails {
            self.draw_trail(ball, surface);
        }
        self.draw_ball(ball, surface);
        self.draw_paddle(&state.paddle, state.hit_glow, surface);
        if self.particles {
            self.draw_effects(&state.effects, surface);
        }
    }

    fn draw_grid<S: DrawSurface + ?Sized>(&self, dims: &Dimensions, surface: &mut S) {
        let mut x = 0.0;
        while x <= dims.width {
            surface.line(
                Vec2::new(x, 0.0),
                Vec2::new(x, dims.height),
                self.palette.grid,
                1.0,
            );
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y <= dims.height {
            surface.line(
                Vec2::new(0.0, y),
                Vec2::new(dims.width, y),
                self.palette.grid,
                1.0,
            );
            y += GRID_SPACING;
        }
    }

    /// Older points shrink and fade; index 0 is the newest
    fn draw_trail<S: DrawSurface + ?Sized>(&self, ball: &Ball, surface: &mut S) {
        let len = ball.trail.len() as f32;
        for (i, point) in ball.trail.iter().enumerate() {
            let t = 1.0 - i as f32 / len;
            let color = with_alpha(self.palette.ball, t * TRAIL_ALPHA);
            surface.fill_circle(*point, ball.radius * t * 0.8, &Fill::Solid(color));
        }
    }

    fn draw_ball<S: DrawSurface + ?Sized>(&self, ball: &Ball, surface: &mut S) {
        if self.glow {
            let halo = Fill::Radial(vec![
                (0.0, self.palette.ball_glow),
                (0.4, with_alpha(self.palette.ball_glow, 0.4)),
                (1.0, with_alpha(self.palette.ball_glow, 0.0)),
            ]);
            surface.fill_circle(ball.pos, ball.radius * BALL_HALO_SCALE, &halo);
        }

        if self.shadow_glow {
            surface.set_shadow(BALL_SHADOW_BLUR, self.palette.ball_glow);
        }
        surface.fill_circle(ball.pos, ball.radius, &Fill::Solid(self.palette.ball));
        if self.shadow_glow {
            surface.clear_shadow();
        }
    }

    fn draw_paddle<S: DrawSurface + ?Sized>(&self, paddle: &Paddle, hit_glow: f32, surface: &mut S) {
        let glow = if self.glow { hit_glow.clamp(0.0, 1.0) } else { 0.0 };
        let strength = 0.15 + 0.45 * glow;
        let disc = Fill::Radial(vec![
            (0.0, with_alpha(self.palette.paddle, strength)),
            (0.7, with_alpha(self.palette.paddle, strength * 0.5)),
            (1.0, with_alpha(self.palette.paddle, 0.0)),
        ]);
        surface.fill_circle(paddle.pos, paddle.radius, &disc);
        surface.stroke_circle(
            paddle.pos,
            paddle.radius,
            with_alpha(self.palette.paddle_ring, 0.6 + 0.4 * glow),
            1.5 + glow,
        );
    }

    fn draw_effects<S: DrawSurface + ?Sized>(&self, effects: &[CollisionEffect], surface: &mut S) {
        for effect in effects {
            for particle in effect.particles.iter().filter(|p| p.is_alive()) {
                let color = with_alpha(self.palette.particle, particle.life);
                surface.fill_circle(particle.pos, particle.size, &Fill::Solid(color));
            }
        }
    }
}
