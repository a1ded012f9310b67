//! Colors for the hero background

use super::surface::Rgba;
use crate::settings::Theme;

/// Theme-dependent colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub grid: Rgba,
    pub ball: Rgba,
    pub ball_glow: Rgba,
    pub paddle: Rgba,
    pub paddle_ring: Rgba,
    pub particle: Rgba,
}

impl Palette {
    pub const DARK: Palette = Palette {
        grid: [1.0, 1.0, 1.0, 0.03],
        ball: [1.0, 1.0, 1.0, 1.0],
        ball_glow: [0.58, 0.65, 1.0, 0.6],
        paddle: [0.55, 0.36, 0.96, 1.0],
        paddle_ring: [1.0, 1.0, 1.0, 0.5],
        particle: [0.75, 0.8, 1.0, 1.0],
    };

    pub const LIGHT: Palette = Palette {
        grid: [0.0, 0.0, 0.0, 0.04],
        ball: [0.07, 0.07, 0.1, 1.0],
        ball_glow: [0.23, 0.32, 0.85, 0.5],
        paddle: [0.42, 0.2, 0.85, 1.0],
        paddle_ring: [0.0, 0.0, 0.0, 0.45],
        particle: [0.2, 0.25, 0.6, 1.0],
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::DARK,
            Theme::Light => Self::LIGHT,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}
