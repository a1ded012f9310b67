//! Hero Pong - decorative physics background for the portfolio hero section
//!
//! Core modules:
//! - `sim`: Ball/paddle physics, collisions and particle effects
//! - `renderer`: Backend-agnostic 2D drawing of the simulation
//! - `platform`: Input adapter, frame scheduling, browser host
//! - `driver`: Per-frame composition of input, physics and rendering
//! - `settings`: Visual preferences

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameOutcome};
pub use settings::{QualityPreset, Settings, Theme, ThemePreference};

use glam::Vec2;

/// World configuration constants
///
/// Speeds are in canvas units per nominal 60 Hz frame.
pub mod consts {
    /// Nominal frame duration in milliseconds (60 Hz)
    pub const NOMINAL_FRAME_MS: f32 = 16.67;
    /// Upper bound for the normalized frame delta
    pub const MAX_DT: f32 = 2.0;

    /// Velocity retained per nominal frame
    pub const FRICTION: f32 = 0.9985;
    /// Ball never moves slower than this (unless at rest)
    pub const MIN_SPEED: f32 = 3.0;
    /// Ball never moves faster than this
    pub const MAX_SPEED: f32 = 18.0;
    /// Width of the random spawn speed band above `MIN_SPEED`
    pub const SPAWN_SPEED_RANGE: f32 = 3.0;
    /// Inelastic wall restitution
    pub const WALL_BOUNCE: f32 = 0.92;
    /// Fraction of paddle velocity imparted on contact
    pub const MOMENTUM_TRANSFER: f32 = 0.4;
    /// Scale applied to the paddle position delta to get its velocity
    pub const PADDLE_VELOCITY_SCALE: f32 = 0.6;
    /// Paddle speed that produces a full-intensity collision effect
    pub const PADDLE_IMPACT_SPEED: f32 = 15.0;

    /// Ball collision and draw radius
    pub const BALL_RADIUS: f32 = 12.0;
    /// Paddle collision and draw radius
    pub const PADDLE_RADIUS: f32 = 40.0;

    /// Number of historical positions kept for the ball trail
    pub const TRAIL_LENGTH: usize = 12;

    /// Intensity of the effect emitted on wall contact
    pub const WALL_IMPACT_INTENSITY: f32 = 0.3;
    /// Hit glow lost per nominal frame
    pub const HIT_GLOW_DECAY: f32 = 0.05;
    /// Effect life lost per nominal frame
    pub const EFFECT_DECAY: f32 = 0.02;
    /// Particle life lost per nominal frame
    pub const PARTICLE_DECAY: f32 = 0.03;
    /// Particle velocity retained per step
    pub const PARTICLE_DAMPING: f32 = 0.96;
    /// Effects at or below this life are removed
    pub const LIFE_EPSILON: f32 = 1e-4;

    /// Background grid spacing
    pub const GRID_SPACING: f32 = 50.0;
}

/// Normalize a wall-clock frame delta (ms) into nominal 60 Hz frames
///
/// Capped at `MAX_DT` so a lag spike can't launch the ball through a wall.
#[inline]
pub fn normalize_dt(delta_ms: f32) -> f32 {
    let dt = delta_ms / consts::NOMINAL_FRAME_MS;
    if dt.is_nan() {
        return 1.0;
    }
    dt.clamp(0.0, consts::MAX_DT)
}

/// Rescale a vector so its length lies in `[min, max]`
///
/// Zero-length vectors are returned unchanged (direction is undefined).
#[inline]
pub fn clamp_speed(v: Vec2, min: f32, max: f32) -> Vec2 {
    let speed = v.length();
    if speed <= 0.0 {
        v
    } else if speed < min {
        v * (min / speed)
    } else if speed > max {
        v * (max / speed)
    } else {
        v
    }
}

/// Clamp `value` into `[lo, hi]`, collapsing to `lo` when the range is empty
#[inline]
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dt() {
        assert!((normalize_dt(16.67) - 1.0).abs() < 1e-6);
        assert!((normalize_dt(8.335) - 0.5).abs() < 1e-4);
        assert_eq!(normalize_dt(1000.0), consts::MAX_DT);
        assert_eq!(normalize_dt(-5.0), 0.0);
        assert_eq!(normalize_dt(f32::NAN), 1.0);
    }

    #[test]
    fn test_clamp_speed() {
        let slow = clamp_speed(Vec2::new(1.0, 0.0), 3.0, 18.0);
        assert!((slow.length() - 3.0).abs() < 1e-5);

        let fast = clamp_speed(Vec2::new(30.0, 40.0), 3.0, 18.0);
        assert!((fast.length() - 18.0).abs() < 1e-4);
        // Direction preserved
        assert!((fast.x / fast.y - 0.75).abs() < 1e-5);

        assert_eq!(clamp_speed(Vec2::ZERO, 3.0, 18.0), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_span_degenerate() {
        assert_eq!(clamp_span(5.0, 12.0, 8.0), 12.0);
        assert_eq!(clamp_span(20.0, 12.0, 88.0), 20.0);
    }
}
