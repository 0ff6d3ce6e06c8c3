//! Single-slot, last-write-wins frame exchange.
//!
//! The decode side publishes whole frames whenever they are ready; the render
//! loop reads whatever is newest once per tick. Nothing queues: a frame that is
//! replaced before anyone reads it is simply dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::frame::Frame;

/// Something the compositor can pull the current frame from.
pub trait FrameProvider {
    /// Returns the most recent frame, if any.
    fn latest(&self) -> Option<Arc<Frame>>;
}

impl<T: FrameProvider + ?Sized> FrameProvider for Arc<T> {
    fn latest(&self) -> Option<Arc<Frame>> {
        (**self).latest()
    }
}

/// A lock-free mailbox holding at most one frame.
///
/// Both [`FrameMailbox::publish`] and [`FrameMailbox::try_take`] are a single
/// atomic pointer swap/load and never block.
#[derive(Default)]
pub struct FrameMailbox {
    slot: ArcSwapOption<Frame>,
    published: AtomicU64,
}

impl FrameMailbox {
    /// Creates an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current frame, dropping any unread one.
    pub fn publish(&self, frame: Arc<Frame>) {
        self.slot.store(Some(frame));
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the most recently published frame without removing it.
    ///
    /// Repeated reads see the same frame until the next publish.
    pub fn try_take(&self) -> Option<Arc<Frame>> {
        self.slot.load_full()
    }

    /// Releases the current frame, leaving the mailbox empty.
    pub fn clear(&self) {
        self.slot.store(None);
    }

    /// Returns whether a frame is currently available.
    pub fn has_frame(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Total number of frames ever published.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl FrameProvider for FrameMailbox {
    fn latest(&self) -> Option<Arc<Frame>> {
        self.try_take()
    }
}
