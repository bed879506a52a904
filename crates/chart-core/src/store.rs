// File: crates/chart-core/src/store.rs
// Summary: Animation state store; every write requests one coalesced redraw.

use crate::host::{FrameCallback, FrameId, FrameScheduler};
use crate::types::PointerState;

/// Builds the callback for the next scheduled frame.
pub type FrameFactory = Box<dyn Fn() -> FrameCallback>;

/// Per-frame mutable values of a chart.
///
/// Each setter writes the value and then asks the scheduler for a frame,
/// unless one is already pending: any number of writes before the frame fires
/// produce a single callback. The frame callback must call
/// [`StateStore::frame_started`] so later writes can schedule again.
pub struct StateStore {
    animated_max: Option<f64>,
    pointer: Option<PointerState>,
    scheduler: Box<dyn FrameScheduler>,
    frame: FrameFactory,
    pending: Option<FrameId>,
    closed: bool,
}

impl StateStore {
    pub fn new(scheduler: Box<dyn FrameScheduler>, frame: FrameFactory) -> Self {
        Self { animated_max: None, pointer: None, scheduler, frame, pending: None, closed: false }
    }

    pub fn animated_max(&self) -> Option<f64> { self.animated_max }

    pub fn set_animated_max(&mut self, value: f64) {
        self.animated_max = Some(value);
        self.request_redraw();
    }

    pub fn pointer(&self) -> Option<&PointerState> { self.pointer.as_ref() }

    pub fn set_pointer(&mut self, pointer: Option<PointerState>) {
        self.pointer = pointer;
        self.request_redraw();
    }

    pub fn is_frame_pending(&self) -> bool { self.pending.is_some() }

    pub fn is_closed(&self) -> bool { self.closed }

    /// Marks the pending frame as running.
    pub fn frame_started(&mut self) { self.pending = None; }

    /// Cancels the pending frame and stops scheduling new ones.
    /// Values can still be written afterwards.
    pub fn close(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        self.closed = true;
    }

    fn request_redraw(&mut self) {
        if self.closed || self.pending.is_some() {
            return;
        }
        let callback = (self.frame)();
        self.pending = Some(self.scheduler.request_frame(callback));
    }
}
