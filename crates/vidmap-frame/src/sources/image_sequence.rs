//! Still images resized to the capture size and played back in a loop.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;

use super::CaptureOptions;
use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;
use crate::producer::FrameSource;

/// Plays a fixed list of still images as a frame stream.
///
/// Images are scaled to the capture size once, up front, so producing a frame
/// is only a copy.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    frames: Vec<RgbImage>,
    cursor: usize,
}

impl ImageSequenceSource {
    /// Builds a sequence from decoded images.
    pub fn from_images(images: Vec<RgbImage>, capture: CaptureOptions) -> FrameResult<Self> {
        capture.validate()?;
        if images.is_empty() {
            return Err(FrameError::EmptySequence);
        }
        let frames = images
            .into_iter()
            .map(|image| fit_to_capture(image, capture))
            .collect();
        Ok(Self { frames, cursor: 0 })
    }

    /// Decodes images from disk, in the order given.
    pub fn open<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        capture: CaptureOptions,
    ) -> FrameResult<Self> {
        let mut images = Vec::new();
        for path in paths {
            let path = path.as_ref();
            log::debug!("decoding {}", path.display());
            images.push(image::open(path)?.to_rgb8());
        }
        Self::from_images(images, capture)
    }

    /// Number of frames in one pass of the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; an empty sequence cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn fit_to_capture(image: RgbImage, capture: CaptureOptions) -> RgbImage {
    if image.dimensions() == (capture.width, capture.height) {
        image
    } else {
        imageops::resize(&image, capture.width, capture.height, FilterType::Triangle)
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> FrameResult<Option<Frame>> {
        let Some(image) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        Frame::from_rgb_image(image.clone()).map(Some)
    }

    fn rewind(&mut self) -> FrameResult<()> {
        self.cursor = 0;
        Ok(())
    }
}
