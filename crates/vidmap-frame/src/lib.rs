//! Frame exchange for vidmap-rs.
//!
//! Decoding runs on producer threads and hands whole frames to the render loop
//! through a single-slot [`FrameMailbox`]:
//! - [`Frame`] and [`PixelFormat`] describe an immutable decoded frame
//! - [`FrameMailbox`] is the lock-free, last-write-wins exchange
//! - [`ProducerTask`] drives any [`FrameSource`] on its own thread
//! - [`sources`] has a synthetic test pattern and a still-image sequence

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod frame;
pub mod mailbox;
pub mod producer;
pub mod sources;

pub use error::{FrameError, FrameResult};
pub use frame::{Frame, PixelFormat};
pub use mailbox::{FrameMailbox, FrameProvider};
pub use producer::{FrameSource, ProducerOptions, ProducerTask};
pub use sources::{CaptureOptions, ImageSequenceSource, TestPatternSource};
