//! Physics stepper
//!
//! Advances the simulation by one frame. Frame time is normalized to nominal
//! 60 Hz frames so drag and decay rates do not depend on the refresh rate.

use super::collision::{Wall, ball_paddle_collision, ball_wall_collision, reflect_velocity};
use super::effects::{decay_effects, emit};
use super::state::SimState;
use crate::consts::*;
use crate::{clamp_span, clamp_speed, normalize_dt};

/// Advance `state` by `delta_ms` of wall-clock time
///
/// The paddle velocity must already be derived for this frame. Does nothing
/// until the ball has spawned.
pub fn step(state: &mut SimState, delta_ms: f32) {
    if state.dims.is_empty() {
        return;
    }
    let dims = state.dims;
    let Some(ball) = state.ball.as_mut() else {
        return;
    };
    let dt = normalize_dt(delta_ms);

    // Integrate and apply frame-rate independent drag
    ball.pos += ball.vel * dt;
    ball.vel *= FRICTION.powf(dt);

    // Never stall
    let speed = ball.vel.length();
    if speed > 0.0 && speed < MIN_SPEED {
        ball.vel *= MIN_SPEED / speed;
    }

    // Walls
    for wall in Wall::ALL {
        let hit = ball_wall_collision(ball.pos, ball.radius, &dims, wall);
        if !hit.hit {
            continue;
        }
        match wall {
            Wall::Left => {
                ball.pos.x = ball.radius;
                ball.vel.x = ball.vel.x.abs() * WALL_BOUNCE;
            }
            Wall::Right => {
                ball.pos.x = dims.width - ball.radius;
                ball.vel.x = -ball.vel.x.abs() * WALL_BOUNCE;
            }
            Wall::Top => {
                ball.pos.y = ball.radius;
                ball.vel.y = ball.vel.y.abs() * WALL_BOUNCE;
            }
            Wall::Bottom => {
                ball.pos.y = dims.height - ball.radius;
                ball.vel.y = -ball.vel.y.abs() * WALL_BOUNCE;
            }
        }
        emit(
            &mut state.effects,
            state.max_effects,
            hit.point,
            WALL_IMPACT_INTENSITY,
            &mut state.rng,
        );
    }

    // Paddle
    let paddle = &state.paddle;
    let hit = ball_paddle_collision(ball.pos, ball.radius, paddle.pos, paddle.radius);
    if hit.hit {
        // Positional correction so the ball can't sink into the paddle
        ball.pos = paddle.pos + hit.normal * (ball.radius + paddle.radius);

        let relative = ball.vel - paddle.vel;
        // Only resolve while approaching; separating contacts are left alone
        if relative.dot(hit.normal) < 0.0 {
            ball.vel = reflect_velocity(ball.vel, hit.normal);
            ball.vel += paddle.vel * MOMENTUM_TRANSFER;
            ball.vel = clamp_speed(ball.vel, 0.0, MAX_SPEED);

            state.hit_glow = 1.0;
            let intensity = (paddle.vel.length() / PADDLE_IMPACT_SPEED).min(1.0);
            emit(
                &mut state.effects,
                state.max_effects,
                hit.point,
                intensity,
                &mut state.rng,
            );
            log::debug!("Paddle hit at {:?}, intensity {:.2}", hit.point, intensity);
        }
    }

    // The paddle may shove the ball past an edge; keep it on screen
    ball.pos.x = clamp_span(ball.pos.x, ball.radius, dims.width - ball.radius);
    ball.pos.y = clamp_span(ball.pos.y, ball.radius, dims.height - ball.radius);
    ball.vel = clamp_speed(ball.vel, MIN_SPEED, MAX_SPEED);

    ball.record_trail();

    state.hit_glow = (state.hit_glow - HIT_GLOW_DECAY * dt).max(0.0);
    decay_effects(&mut state.effects, dt);
}
