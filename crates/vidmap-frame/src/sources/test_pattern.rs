//! A synthetic color-bar source that scrolls one column per frame.

use vidmap_core::color::rgb;

use super::CaptureOptions;
use crate::error::FrameResult;
use crate::frame::Frame;
use crate::producer::FrameSource;

/// Classic eight-bar palette, left to right.
const BARS: [u32; 8] = [
    rgb(255, 255, 255),
    rgb(255, 255, 0),
    rgb(0, 255, 255),
    rgb(0, 255, 0),
    rgb(255, 0, 255),
    rgb(255, 0, 0),
    rgb(0, 0, 255),
    rgb(0, 0, 0),
];

/// An endless synthetic source of vertical color bars that scroll one pixel
/// to the left per frame.
///
/// Useful for checking a mapping without any video decoding.
#[derive(Debug, Clone)]
pub struct TestPatternSource {
    capture: CaptureOptions,
    frame_index: u64,
}

impl TestPatternSource {
    /// Creates a source producing frames of the given capture size.
    pub fn new(capture: CaptureOptions) -> FrameResult<Self> {
        capture.validate()?;
        Ok(Self {
            capture,
            frame_index: 0,
        })
    }

    /// Color of column `x` in frame `frame_index`.
    #[must_use]
    pub fn color_at(&self, x: u32, frame_index: u64) -> u32 {
        let width = u64::from(self.capture.width);
        let column = (u64::from(x) + frame_index) % width;
        // column < width, so the bar index is always below 8
        let bar = (column * BARS.len() as u64 / width) as usize;
        BARS[bar] & 0x00FF_FFFF
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self) -> FrameResult<Option<Frame>> {
        let CaptureOptions { width, height } = self.capture;
        let row: Vec<u32> = (0..width).map(|x| self.color_at(x, self.frame_index)).collect();
        let pixels = row.repeat(height as usize);
        self.frame_index += 1;
        Frame::from_packed_rgb(width, height, pixels).map(Some)
    }

    fn rewind(&mut self) -> FrameResult<()> {
        self.frame_index = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_span_the_frame() {
        let mut source = TestPatternSource::new(CaptureOptions::new(8, 2).unwrap()).unwrap();
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 2));
        assert_eq!(frame.rgb_at(0, 0), Some([255, 255, 255]));
        assert_eq!(frame.rgb_at(5, 1), Some([255, 0, 0]));
        assert_eq!(frame.rgb_at(7, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_bars_scroll_and_rewind() {
        let mut source = TestPatternSource::new(CaptureOptions::new(8, 1).unwrap()).unwrap();
        let _ = source.next_frame().unwrap();
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.rgb_at(0, 0), Some([255, 255, 0]));

        source.rewind().unwrap();
        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.rgb_at(0, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_default_capture_size() {
        let mut source = TestPatternSource::new(CaptureOptions::default()).unwrap();
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!((frame.width(), frame.height()), (160, 120));
    }
}
