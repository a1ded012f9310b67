use glam::Vec2;
use hero_pong::consts::*;
use hero_pong::platform::{PointerEvent, apply_pointer};
use hero_pong::sim::{Ball, Paddle, SimState, step};
use proptest::prelude::*;
use proptest::test_runner::Config;

const TOLERANCE: f32 = 1e-3;

/// A viewport with a ball somewhere inside it, moving within the speed band
fn arena() -> impl Strategy<Value = (f32, f32, Vec2, Vec2)> {
    (200.0f32..1600.0, 200.0f32..1000.0).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            (BALL_RADIUS..w - BALL_RADIUS, BALL_RADIUS..h - BALL_RADIUS),
            (0.0f32..std::f32::consts::TAU, MIN_SPEED..MAX_SPEED),
        )
            .prop_map(|(w, h, (x, y), (angle, speed))| {
                (w, h, Vec2::new(x, y), Vec2::from_angle(angle) * speed)
            })
    })
}

/// Pointer positions, including some beyond the viewport edges
fn pointer_path() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-200.0f32..1800.0, -200.0f32..1200.0), 1..120)
}

fn setup(w: f32, h: f32, pos: Vec2, vel: Vec2, seed: u64) -> SimState {
    let mut state = SimState::new(seed);
    state.resize(w, h);
    state.ball = Some(Ball::new(pos, vel));
    state.paddle = Paddle::at(Vec2::new(w / 2.0, h / 2.0));
    state
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn ball_speed_stays_in_band(
        (w, h, pos, vel) in arena(),
        path in pointer_path(),
        deltas in prop::collection::vec(0.0f32..120.0, 1..8),
        seed in any::<u64>(),
    ) {
        let mut state = setup(w, h, pos, vel, seed);
        for (i, (px, py)) in path.iter().enumerate() {
            apply_pointer(&mut state.paddle, PointerEvent::Move { x: *px, y: *py });
            state.paddle.derive_velocity();
            step(&mut state, deltas[i % deltas.len()]);

            let speed = state.ball.as_ref().unwrap().speed();
            prop_assert!(speed >= MIN_SPEED - TOLERANCE, "speed {} below floor", speed);
            prop_assert!(speed <= MAX_SPEED + TOLERANCE, "speed {} above cap", speed);
        }
    }

    #[test]
    fn ball_never_leaves_viewport(
        (w, h, pos, vel) in arena(),
        path in pointer_path(),
        delta in 0.0f32..200.0,
        seed in any::<u64>(),
    ) {
        let mut state = setup(w, h, pos, vel, seed);
        for (px, py) in path {
            apply_pointer(&mut state.paddle, PointerEvent::Move { x: px, y: py });
            state.paddle.derive_velocity();
            step(&mut state, delta);

            let ball = state.ball.as_ref().unwrap();
            prop_assert!(ball.pos.x >= BALL_RADIUS - TOLERANCE);
            prop_assert!(ball.pos.x <= w - BALL_RADIUS + TOLERANCE);
            prop_assert!(ball.pos.y >= BALL_RADIUS - TOLERANCE);
            prop_assert!(ball.pos.y <= h - BALL_RADIUS + TOLERANCE);
        }
    }

    #[test]
    fn trail_is_bounded(
        (w, h, pos, vel) in arena(),
        frames in 1usize..200,
    ) {
        let mut state = setup(w, h, pos, vel, 1);
        for frame in 1..=frames {
            state.paddle.derive_velocity();
            step(&mut state, NOMINAL_FRAME_MS);
            let len = state.ball.as_ref().unwrap().trail.len();
            prop_assert_eq!(len, frame.min(TRAIL_LENGTH));
        }
    }

    #[test]
    fn effects_stay_within_cap(
        (w, h, pos, vel) in arena(),
        cap in 0usize..6,
        path in pointer_path(),
    ) {
        let mut state = setup(w, h, pos, vel, 9);
        state.max_effects = cap;
        for (px, py) in path {
            apply_pointer(&mut state.paddle, PointerEvent::Move { x: px, y: py });
            state.paddle.derive_velocity();
            step(&mut state, NOMINAL_FRAME_MS);
            prop_assert!(state.effects.len() <= cap);
            for effect in &state.effects {
                prop_assert!(effect.life > 0.0 && effect.life <= 1.0);
                prop_assert!((8..=20).contains(&effect.particles.len()));
            }
        }
    }
}
