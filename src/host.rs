/*
 * Host Module
 *
 * The animator depends on two host facilities:
 * - FrameScheduler: one-shot "call me before the next repaint" requests,
 *   cancellable by handle
 * - ResizeSignal: subscription to the viewport's "size changed" event
 *
 * HostLoop implements both for a single-threaded frame loop. The driver
 * (the nannou update loop, or a test) drains due frames with `due_frames`
 * and forwards each handle to whoever requested it. It also counts calls,
 * which makes it a convenient spy.
 */

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait ResizeSignal {
    fn subscribe_resize(&mut self) -> ListenerId;
    fn unsubscribe_resize(&mut self, id: ListenerId);
}

// Shared single-threaded host handle, so the driver keeps access while an
// animator holds its own clone
impl<T: FrameScheduler> FrameScheduler for Rc<RefCell<T>> {
    fn request_frame(&mut self) -> FrameHandle {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel_frame(handle)
    }
}

impl<T: ResizeSignal> ResizeSignal for Rc<RefCell<T>> {
    fn subscribe_resize(&mut self) -> ListenerId {
        self.borrow_mut().subscribe_resize()
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.borrow_mut().unsubscribe_resize(id)
    }
}

#[derive(Debug, Default)]
pub struct HostLoop {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerId>,
    frames_requested: usize,
    frames_cancelled: usize,
}

impl HostLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // Frames that are due at this vsync. Each request fires at most once.
    pub fn due_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> usize {
        self.frames_cancelled
    }
}

impl FrameScheduler for HostLoop {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending.insert(handle);
        self.frames_requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // Cancelling a frame that already fired is harmless
        if self.pending.remove(&handle) {
            self.frames_cancelled += 1;
        }
    }
}

impl ResizeSignal for HostLoop {
    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
