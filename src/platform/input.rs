//! Pointer input adapter
//!
//! Pointer and touch coordinates are taken as-is in viewport space and written
//! straight into the paddle. Only the latest position matters; intermediate
//! moves between two frames are never replayed.

use glam::Vec2;

use crate::sim::Paddle;

/// A pointer movement reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent<'a> {
    /// Mouse / pen move in viewport coordinates
    Move { x: f32, y: f32 },
    /// Touch move; only the first touch point is used
    Touch(&'a [Vec2]),
}

impl PointerEvent<'_> {
    /// Viewport position this event points at, if any
    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerEvent::Move { x, y } => Some(Vec2::new(*x, *y)),
            PointerEvent::Touch(touches) => touches.first().copied(),
        }
    }
}

/// Move the paddle to the event position
///
/// Returns false when the event carried no usable point (empty touch list or
/// non-finite coordinates). Off-screen points are accepted.
pub fn apply_pointer(paddle: &mut Paddle, event: PointerEvent<'_>) -> bool {
    match event.position() {
        Some(pos) if pos.is_finite() => {
            paddle.pos = pos;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_move_sets_position() {
        let mut paddle = Paddle::at(Vec2::new(50.0, 50.0));
        assert!(apply_pointer(&mut paddle, PointerEvent::Move { x: 120.0, y: 80.0 }));
        assert_eq!(paddle.pos, Vec2::new(120.0, 80.0));
        // Velocity is left for the driver to derive
        assert_eq!(paddle.vel, Vec2::ZERO);
        assert_eq!(paddle.last_pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_first_touch_only() {
        let mut paddle = Paddle::default();
        let touches = [Vec2::new(10.0, 20.0), Vec2::new(300.0, 400.0)];
        assert!(apply_pointer(&mut paddle, PointerEvent::Touch(&touches)));
        assert_eq!(paddle.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_empty_touch_ignored() {
        let mut paddle = Paddle::at(Vec2::new(5.0, 5.0));
        assert!(!apply_pointer(&mut paddle, PointerEvent::Touch(&[])));
        assert_eq!(paddle.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_off_screen_accepted() {
        let mut paddle = Paddle::default();
        assert!(apply_pointer(&mut paddle, PointerEvent::Move { x: -40.0, y: 9000.0 }));
        assert_eq!(paddle.pos, Vec2::new(-40.0, 9000.0));
    }

    #[test]
    fn test_latest_move_wins() {
        let mut paddle = Paddle::default();
        for x in [10.0, 20.0, 30.0] {
            apply_pointer(&mut paddle, PointerEvent::Move { x, y: 0.0 });
        }
        assert_eq!(paddle.pos, Vec2::new(30.0, 0.0));
    }
}
