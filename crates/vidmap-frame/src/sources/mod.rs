//! Built-in frame sources.

mod image_sequence;
mod test_pattern;

pub use image_sequence::ImageSequenceSource;
pub use test_pattern::TestPatternSource;

use crate::error::{FrameError, FrameResult};

/// Largest supported capture width.
pub const MAX_CAPTURE_WIDTH: u32 = 1920;
/// Largest supported capture height.
pub const MAX_CAPTURE_HEIGHT: u32 = 1080;

/// Size frames are decoded at before they are published.
///
/// Small captures are the norm: LED models rarely have more points than a
/// 160x120 frame has pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
        }
    }
}

impl CaptureOptions {
    /// Creates a validated capture size.
    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        let options = Self { width, height };
        options.validate()?;
        Ok(options)
    }

    /// Checks the size is within `1x1..=1920x1080`.
    pub fn validate(&self) -> FrameResult<()> {
        if (1..=MAX_CAPTURE_WIDTH).contains(&self.width)
            && (1..=MAX_CAPTURE_HEIGHT).contains(&self.height)
        {
            Ok(())
        } else {
            Err(FrameError::InvalidCaptureSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capture_size() {
        let options = CaptureOptions::default();
        assert_eq!((options.width, options.height), (160, 120));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_capture_size_limits() {
        assert!(CaptureOptions::new(1, 1).is_ok());
        assert!(CaptureOptions::new(1920, 1080).is_ok());
        assert!(matches!(
            CaptureOptions::new(0, 120),
            Err(FrameError::InvalidCaptureSize { width: 0, height: 120 })
        ));
        assert!(CaptureOptions::new(1921, 120).is_err());
        assert!(CaptureOptions::new(160, 1081).is_err());
    }
}
