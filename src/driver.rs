//! Frame driver
//!
//! Owns the simulation and composes one frame: derive paddle velocity, step
//! physics, render, schedule the next frame. Pointer and resize events write
//! plain fields between frames; each frame reads whatever is current.

use crate::consts::NOMINAL_FRAME_MS;
use crate::platform::input::{PointerEvent, apply_pointer};
use crate::platform::scheduler::{FrameScheduler, LoopState};
use crate::renderer::{DrawSurface, Renderer};
use crate::settings::{Settings, Theme};
use crate::sim::{SimState, step};

/// What a frame callback ended up doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Physics advanced by `delta_ms` and the frame was drawn
    Stepped { delta_ms: f32 },
    /// Surface or dimensions not ready; retrying next frame
    Skipped,
    /// Loop is stopped; a stale callback was dropped untouched
    Ignored,
}

/// Canvas backing-store size for a CSS size at a device pixel ratio
pub fn backing_size(css_width: f32, css_height: f32, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scale = |v: f32| (v.max(0.0) as f64 * dpr).round() as u32;
    (scale(css_width), scale(css_height))
}

/// The render loop
pub struct FrameDriver<S: FrameScheduler> {
    pub state: SimState,
    pub renderer: Renderer,
    scheduler: S,
    loop_state: LoopState,
    pending: Option<S::Handle>,
    last_timestamp: Option<f64>,
    waiting_for_surface: bool,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(seed: u64, settings: &Settings, theme: Theme, scheduler: S) -> Self {
        let mut state = SimState::new(seed);
        state.max_effects = settings.max_effects();
        Self {
            state,
            renderer: Renderer::new(settings, theme),
            scheduler,
            loop_state: LoopState::Idle,
            pending: None,
            last_timestamp: None,
            waiting_for_surface: false,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Idle -> Running; no-op if already running
    pub fn start(&mut self) {
        if self.loop_state == LoopState::Running {
            return;
        }
        self.loop_state = LoopState::Running;
        self.last_timestamp = None;
        self.schedule();
        log::info!("Render loop started");
    }

    /// Running -> Idle, cancelling the pending frame
    pub fn stop(&mut self) {
        if self.loop_state == LoopState::Idle {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.loop_state = LoopState::Idle;
        log::info!("Render loop stopped");
    }

    fn schedule(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Apply new settings to emission limits and drawing
    pub fn apply_settings(&mut self, settings: &Settings, theme: Theme) {
        self.state.max_effects = settings.max_effects();
        self.renderer = Renderer::new(settings, theme);
    }

    /// Pointer or touch moved; takes effect on the next frame
    pub fn pointer_moved(&mut self, event: PointerEvent<'_>) {
        apply_pointer(&mut self.state.paddle, event);
    }

    /// Viewport resized; returns the backing-store size for the canvas
    pub fn resize(&mut self, css_width: f32, css_height: f32, device_pixel_ratio: f64) -> (u32, u32) {
        log::debug!(
            "Resize to {}x{} @{}x",
            css_width,
            css_height,
            device_pixel_ratio
        );
        self.state.resize(css_width, css_height);
        backing_size(css_width, css_height, device_pixel_ratio)
    }

    /// Display frame callback
    ///
    /// `surface` is None when the host could not resolve a drawing context.
    pub fn on_frame<D: DrawSurface + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        surface: Option<&mut D>,
    ) -> FrameOutcome {
        if self.loop_state == LoopState::Idle {
            return FrameOutcome::Ignored;
        }
        // This frame's request has fired
        self.pending = None;

        let surface = match surface {
            Some(surface) if self.state.is_ready() => surface,
            _ => {
                if !self.waiting_for_surface {
                    log::debug!("Surface not ready, waiting");
                    self.waiting_for_surface = true;
                }
                self.schedule();
                return FrameOutcome::Skipped;
            }
        };
        if self.waiting_for_surface {
            log::debug!("Surface ready");
            self.waiting_for_surface = false;
        }

        let delta_ms = match self.last_timestamp {
            Some(last) => (timestamp_ms - last) as f32,
            None => NOMINAL_FRAME_MS,
        };
        self.last_timestamp = Some(timestamp_ms);

        // Paddle velocity must be derived before physics reads it
        self.state.paddle.derive_velocity();
        step(&mut self.state, delta_ms);
        self.renderer.render(&self.state, surface);

        self.schedule();
        FrameOutcome::Stepped { delta_ms }
    }
}
