//! Collision detection and response
//!
//! Walls are the four edges of the viewport; the paddle is a disc. Both
//! report a `CollisionResult` with the surface normal pointing toward the
//! ball and the penetration depth for positional correction.

use glam::Vec2;

use super::state::Dimensions;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Surface normal at contact, pointing toward the ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// One edge of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Inward-facing normal
    pub fn normal(self) -> Vec2 {
        match self {
            Wall::Left => Vec2::X,
            Wall::Right => Vec2::NEG_X,
            Wall::Top => Vec2::Y,
            Wall::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Check whether the ball's bounding edge has crossed `wall`
///
/// The contact point lies on the wall at the ball's projected position.
pub fn ball_wall_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    dims: &Dimensions,
    wall: Wall,
) -> CollisionResult {
    let (penetration, point) = match wall {
        Wall::Left => (ball_radius - ball_pos.x, Vec2::new(0.0, ball_pos.y)),
        Wall::Right => (
            ball_pos.x + ball_radius - dims.width,
            Vec2::new(dims.width, ball_pos.y),
        ),
        Wall::Top => (ball_radius - ball_pos.y, Vec2::new(ball_pos.x, 0.0)),
        Wall::Bottom => (
            ball_pos.y + ball_radius - dims.height,
            Vec2::new(ball_pos.x, dims.height),
        ),
    };

    if penetration > 0.0 {
        CollisionResult {
            hit: true,
            point,
            normal: wall.normal(),
            penetration,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Circle-circle check between ball and paddle
///
/// Exactly coincident centers have no defined normal and count as a miss.
pub fn ball_paddle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    paddle_pos: Vec2,
    paddle_radius: f32,
) -> CollisionResult {
    let delta = ball_pos - paddle_pos;
    let distance = delta.length();
    let min_distance = ball_radius + paddle_radius;

    if distance >= min_distance || distance <= 0.0 {
        return CollisionResult::miss();
    }

    let normal = delta / distance;
    CollisionResult {
        hit: true,
        point: paddle_pos + normal * paddle_radius,
        normal,
        penetration: min_distance - distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
