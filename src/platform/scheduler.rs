//! Frame scheduling
//!
//! The host owns the display clock. The driver asks it for exactly one
//! callback at a time and cancels the pending one when it stops.

/// Whether the render loop is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

/// Host primitive that invokes the frame callback once per display refresh
pub trait FrameScheduler {
    /// Cancellation handle for a pending callback
    type Handle;

    /// Request a single callback for the next display frame
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancel a callback that has not fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Scheduler driven by hand, for tests and headless runs
///
/// Frames fire only when the owner delivers them; the scheduler just tracks
/// what was requested and cancelled.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Option<u32>,
    pub requested: u32,
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the callback waiting to fire
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Consume the pending request as if the display had fired it
    pub fn fire(&mut self) -> Option<u32> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next_id += 1;
        self.requested += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_fire() {
        let mut sched = ManualScheduler::new();
        let h = sched.request_frame();
        assert_eq!(sched.pending(), Some(h));
        assert_eq!(sched.fire(), Some(h));
        assert_eq!(sched.pending(), None);
        assert_eq!(sched.fire(), None);
    }

    #[test]
    fn test_cancel_only_pending() {
        let mut sched = ManualScheduler::new();
        let first = sched.request_frame();
        sched.fire();
        let second = sched.request_frame();
        sched.cancel_frame(first);
        assert_eq!(sched.pending(), Some(second));
        sched.cancel_frame(second);
        assert_eq!(sched.pending(), None);
        assert_eq!(sched.cancelled, 1);
    }
}
