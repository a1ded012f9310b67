//! Simulation state and core types
//!
//! Everything the stepper mutates and the renderer reads lives in `SimState`,
//! owned by the frame driver and lent out one tick at a time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Size of the drawing surface in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True until the viewport has reported a usable size
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The bouncing ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Past positions, newest first
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Spawn with a random heading and a speed just above the floor
    pub fn spawn(pos: Vec2, rng: &mut Pcg32) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = MIN_SPEED + rng.random_range(0.0..SPAWN_SPEED_RANGE);
        Self::new(pos, Vec2::from_angle(angle) * speed)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Record current position at the front of the trail
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(TRAIL_LENGTH);
    }
}

/// Pointer-driven paddle
///
/// `vel` is derived from the position delta once per frame by the driver;
/// nothing else writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub last_pos: Vec2,
    pub radius: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl Paddle {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            last_pos: pos,
            radius: PADDLE_RADIUS,
        }
    }

    /// Derive velocity from movement since the previous frame, then
    /// snapshot the current position. Must run before the physics step.
    pub fn derive_velocity(&mut self) {
        self.vel = (self.pos - self.last_pos) * PADDLE_VELOCITY_SCALE;
        self.last_pos = self.pos;
    }
}

/// A spark thrown off by a collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// A burst of particles at a contact point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionEffect {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
    /// 0-1, the effect is removed once this runs out
    pub life: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub dims: Dimensions,
    /// None until the viewport size is first known
    pub ball: Option<Ball>,
    pub paddle: Paddle,
    pub effects: Vec<CollisionEffect>,
    /// Paddle hit feedback, 0-1
    pub hit_glow: f32,
    /// Cap on simultaneously active effects (0 disables emission)
    pub max_effects: usize,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Default cap on active effects
    pub const DEFAULT_MAX_EFFECTS: usize = 16;

    pub fn new(seed: u64) -> Self {
        Self {
            dims: Dimensions::default(),
            ball: None,
            paddle: Paddle::default(),
            effects: Vec::new(),
            hit_glow: 0.0,
            max_effects: Self::DEFAULT_MAX_EFFECTS,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a viewport size change
    ///
    /// The first usable size spawns the ball and centers the paddle; later
    /// calls only update the dimensions. Returns true when this call spawned.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.dims = Dimensions::new(width.max(0.0), height.max(0.0));
        if self.ball.is_some() || self.dims.is_empty() {
            return false;
        }

        let center = self.dims.center();
        self.paddle = Paddle::at(center);
        let spawn = Vec2::new(center.x, self.dims.height / 4.0);
        self.ball = Some(Ball::spawn(spawn, &mut self.rng));
        log::info!(
            "Ball spawned in {}x{} viewport (seed {})",
            self.dims.width,
            self.dims.height,
            self.seed
        );
        true
    }

    /// Whether there is anything to step or draw
    pub fn is_ready(&self) -> bool {
        self.ball.is_some() && !self.dims.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dims: self.dims,
            ball: self.ball.clone(),
            paddle: self.paddle.clone(),
            active_effects: self.effects.len(),
            hit_glow: self.hit_glow,
        }
    }
}

/// Serializable view of the state for logging and the headless binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub dims: Dimensions,
    pub ball: Option<Ball>,
    pub paddle: Paddle,
    pub active_effects: usize,
    pub hit_glow: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_on_first_resize() {
        let mut state = SimState::new(7);
        assert!(!state.is_ready());

        assert!(state.resize(800.0, 600.0));
        let ball = state.ball.as_ref().unwrap();
        assert_eq!(ball.pos, Vec2::new(400.0, 150.0));
        let speed = ball.speed();
        assert!(speed >= MIN_SPEED && speed < MIN_SPEED + SPAWN_SPEED_RANGE);
        assert_eq!(state.paddle.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.paddle.last_pos, state.paddle.pos);
    }

    #[test]
    fn test_zero_size_does_not_spawn() {
        let mut state = SimState::new(1);
        assert!(!state.resize(0.0, 600.0));
        assert!(state.ball.is_none());
        assert!(state.resize(300.0, 200.0));
    }

    #[test]
    fn test_later_resize_keeps_positions() {
        let mut state = SimState::new(3);
        state.resize(800.0, 600.0);
        let ball_pos = state.ball.as_ref().unwrap().pos;

        assert!(!state.resize(1024.0, 768.0));
        assert_eq!(state.dims, Dimensions::new(1024.0, 768.0));
        assert_eq!(state.ball.as_ref().unwrap().pos, ball_pos);
        assert_eq!(state.paddle.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let mut a = SimState::new(99);
        let mut b = SimState::new(99);
        a.resize(640.0, 480.0);
        b.resize(640.0, 480.0);
        assert_eq!(a.ball.unwrap().vel, b.ball.unwrap().vel);
    }

    #[test]
    fn test_trail_bounded_newest_first() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO);
        for i in 0..20 {
            ball.pos = Vec2::new(i as f32, 0.0);
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);
        assert_eq!(ball.trail[0], Vec2::new(19.0, 0.0));
        assert_eq!(ball.trail[TRAIL_LENGTH - 1], Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_paddle_derive_velocity() {
        let mut paddle = Paddle::at(Vec2::new(100.0, 100.0));
        paddle.pos = Vec2::new(110.0, 95.0);
        paddle.derive_velocity();
        assert!((paddle.vel - Vec2::new(6.0, -3.0)).length() < 1e-5);
        assert_eq!(paddle.last_pos, paddle.pos);

        // No movement since last frame
        paddle.derive_velocity();
        assert_eq!(paddle.vel, Vec2::ZERO);
    }
}
