//! Frame exchange error types.

use thiserror::Error;

/// Errors that can occur while building frames or running producers.
#[derive(Error, Debug)]
pub enum FrameError {
    /// A frame must be at least one pixel in each dimension, and its buffer
    /// size must fit in `usize`.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer does not match the frame dimensions and format.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Capture size outside the supported range.
    #[error("capture size {width}x{height} is outside 1x1..=1920x1080")]
    InvalidCaptureSize { width: u32, height: u32 },

    /// An image sequence was created without any images.
    #[error("image sequence is empty")]
    EmptySequence,

    /// Failed to decode an image.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to spawn a producer thread.
    #[error("failed to spawn producer thread: {0}")]
    Spawn(std::io::Error),
}

/// A specialized Result type for frame operations.
pub type FrameResult<T> = std::result::Result<T, FrameError>;
