//! Decoded video frames.

use image::RgbImage;

use crate::error::{FrameError, FrameResult};

/// Byte layout of one interleaved pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Blue, green, red, padding.
    #[default]
    Bgrx,
    /// Padding, red, green, blue.
    Xrgb,
    /// Red, green, blue, padding.
    Rgbx,
    /// Blue, green, red, alpha.
    Bgra,
    /// Red, green, blue, alpha.
    Rgba,
    /// Red, green, blue.
    Rgb,
}

impl PixelFormat {
    /// The layout of a `u32` holding `0x00RRGGBB` in native byte order.
    ///
    /// Little-endian hosts see `Bgrx`, big-endian hosts `Xrgb`.
    #[must_use]
    pub const fn native_packed() -> Self {
        if cfg!(target_endian = "little") {
            Self::Bgrx
        } else {
            Self::Xrgb
        }
    }

    /// Number of bytes per pixel.
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb => 3,
            _ => 4,
        }
    }

    /// Byte offsets of the red, green and blue channels within a pixel.
    #[must_use]
    pub const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Bgrx | Self::Bgra => [2, 1, 0],
            Self::Xrgb => [1, 2, 3],
            Self::Rgbx | Self::Rgba | Self::Rgb => [0, 1, 2],
        }
    }
}

/// An immutable decoded frame, stored top row first.
///
/// Frames are fully built before they are published and are shared as
/// `Arc<Frame>` afterwards; nothing mutates a frame once it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
    sequence: u64,
}

impl Frame {
    /// Creates a frame from an interleaved pixel buffer.
    ///
    /// The buffer must hold exactly `width * height` pixels of `format`, with no
    /// row padding.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> FrameResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(format.bytes_per_pixel()))
            .filter(|&len| len > 0)
            .ok_or(FrameError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
            sequence: 0,
        })
    }

    /// Creates a frame from `0x00RRGGBB` pixels in native byte order.
    pub fn from_packed_rgb(width: u32, height: u32, pixels: Vec<u32>) -> FrameResult<Self> {
        let data = bytemuck::cast_slice::<u32, u8>(&pixels).to_vec();
        Self::new(width, height, PixelFormat::native_packed(), data)
    }

    /// Creates a frame from a decoded RGB image.
    pub fn from_rgb_image(image: RgbImage) -> FrameResult<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, PixelFormat::Rgb, image.into_raw())
    }

    /// Tags the frame with its position in the decoded stream.
    #[must_use]
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw interleaved pixel bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Position of this frame in the decoded stream.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the red, green and blue channels of the pixel at column `x` of
    /// storage row `row` (row 0 is the top of the image).
    #[must_use]
    pub fn rgb_at(&self, x: u32, row: u32) -> Option<[u8; 3]> {
        if x >= self.width || row >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let base = (row as usize * self.width as usize + x as usize) * bpp;
        let [r, g, b] = self.format.rgb_offsets();
        Some([self.data[base + r], self.data[base + g], self.data[base + b]])
    }
}
