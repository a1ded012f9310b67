//! 2D rendering module
//!
//! The scene is described through the `DrawSurface` trait so the same code
//! drives the browser canvas and the recording surface used in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;
pub mod scene;
pub mod surface;

pub use palette::Palette;
pub use scene::Renderer;
pub use surface::{CommandRecorder, DrawCommand, DrawSurface, Fill, Rgba};
