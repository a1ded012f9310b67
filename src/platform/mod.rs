//! Platform abstraction layer
//!
//! Handles the host side of the render loop:
//! - Pointer/touch input
//! - Display frame scheduling
//! - Browser wiring (canvas, listeners, device pixel ratio)

pub mod input;
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{PointerEvent, apply_pointer};
pub use scheduler::{FrameScheduler, LoopState, ManualScheduler};
