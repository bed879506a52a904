// File: crates/chart-core/src/host.rs
// Summary: Host capabilities the engine binds to (pointer events, frame scheduling)
// plus single-threaded in-process implementations of both.
// Notes:
// - `FrameQueue` and `PointerListeners` are cheap handles over shared state; the host
//   keeps one clone to drive frames/events while the engine owns another.
// - Both release their internal borrow before invoking callbacks, so a callback may
//   request frames or (un)register listeners.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::BoundingRect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Leave,
}

/// Pointer notification in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Event wiring of the element that hosts the drawing surface.
pub trait SurfaceEvents {
    fn on(&mut self, kind: PointerEventKind, handler: PointerHandler) -> ListenerId;
    fn off(&mut self, kind: PointerEventKind, id: ListenerId);
    fn bounding_rect(&self) -> BoundingRect;
}

pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Defers work to just before the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
}

// ---- FrameQueue ---------------------------------------------------------------

#[derive(Default)]
struct QueueState {
    next_id: u64,
    pending: Vec<(FrameId, FrameCallback)>,
}

/// Manually driven frame scheduler: callbacks queue up until `run_frame`.
#[derive(Clone, Default)]
pub struct FrameQueue {
    state: Rc<RefCell<QueueState>>,
}

impl FrameQueue {
    pub fn new() -> Self { Self::default() }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize { self.state.borrow().pending.len() }

    /// Fire every callback queued before this call. Callbacks requested while
    /// running are left for the following frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut self.state.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    /// Run frames until nothing is queued or `max_frames` is reached.
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = FrameId(state.next_id);
        state.pending.push((id, callback));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.state.borrow_mut().pending.retain(|(queued, _)| *queued != id);
    }
}

// ---- PointerListeners ---------------------------------------------------------

struct ListenerState {
    next_id: u64,
    rect: BoundingRect,
    handlers: Vec<(PointerEventKind, ListenerId, PointerHandler)>,
}

/// Listener registry for a surface whose events the host synthesizes.
#[derive(Clone)]
pub struct PointerListeners {
    state: Rc<RefCell<ListenerState>>,
}

impl PointerListeners {
    pub fn new(rect: BoundingRect) -> Self {
        Self {
            state: Rc::new(RefCell::new(ListenerState { next_id: 0, rect, handlers: Vec::new() })),
        }
    }

    pub fn set_rect(&self, rect: BoundingRect) { self.state.borrow_mut().rect = rect; }

    /// Number of live listeners for `kind`.
    pub fn count(&self, kind: PointerEventKind) -> usize {
        self.state.borrow().handlers.iter().filter(|(k, _, _)| *k == kind).count()
    }

    /// Deliver `event` to every listener of `kind`. Returns how many were called.
    pub fn dispatch(&self, kind: PointerEventKind, event: PointerEvent) -> usize {
        let targets: Vec<PointerHandler> = self
            .state
            .borrow()
            .handlers
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in &targets {
            handler(&event);
        }
        targets.len()
    }

    pub fn pointer_move(&self, client_x: f64, client_y: f64) -> usize {
        self.dispatch(PointerEventKind::Move, PointerEvent::new(client_x, client_y))
    }

    pub fn pointer_leave(&self) -> usize {
        self.dispatch(PointerEventKind::Leave, PointerEvent::default())
    }
}

impl SurfaceEvents for PointerListeners {
    fn on(&mut self, kind: PointerEventKind, handler: PointerHandler) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.handlers.push((kind, id, handler));
        id
    }

    fn off(&mut self, kind: PointerEventKind, id: ListenerId) {
        self.state.borrow_mut().handlers.retain(|(k, i, _)| !(*k == kind && *i == id));
    }

    fn bounding_rect(&self) -> BoundingRect { self.state.borrow().rect }
}
