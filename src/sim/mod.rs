//! Physics simulation module
//!
//! All ball/paddle logic lives here. This module is pure numeric code:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Cannot fail; degenerate geometry is skipped for the frame

pub mod collision;
pub mod effects;
pub mod state;
pub mod step;

pub use collision::{CollisionResult, Wall, ball_paddle_collision, ball_wall_collision, reflect_velocity};
pub use effects::{burst_size, decay_effects, emit, spawn_effect};
pub use state::{Ball, CollisionEffect, Dimensions, Paddle, Particle, SimState, Snapshot};
pub use step::step;
