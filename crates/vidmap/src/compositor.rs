//! Per-tick composition of a frame onto a point model.

use vidmap_core::color::NO_COLOR;
use vidmap_core::{transform_uv, PointSource, TransformConfig, UvTableProvider};
use vidmap_frame::FrameProvider;

use crate::sampler::sample;

/// What a single render pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Size of the frame that was sampled, or `None` if there was no frame.
    pub frame: Option<(u32, u32)>,
    /// Points that received a sampled color.
    pub sampled: usize,
    /// Points that fell outside the sample window.
    pub blank: usize,
    /// Points whose index had no slot in the output buffer.
    pub mismatched: usize,
}

impl TickStats {
    /// Returns whether anything was written.
    pub fn rendered(&self) -> bool {
        self.frame.is_some()
    }
}

/// Samples the latest frame for every point of a model.
///
/// Frames come from any [`FrameProvider`] and UV tables from any
/// [`UvTableProvider`]; the compositor does not know how either is produced.
pub struct Compositor<F, P> {
    frames: F,
    uv_tables: P,
    transform: TransformConfig,
}

impl<F: FrameProvider, P: UvTableProvider> Compositor<F, P> {
    /// Creates a compositor with the identity transform.
    pub fn new(frames: F, uv_tables: P) -> Self {
        Self {
            frames,
            uv_tables,
            transform: TransformConfig::default(),
        }
    }

    /// Sets the transform used for subsequent passes.
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// The current transform.
    pub fn transform(&self) -> &TransformConfig {
        &self.transform
    }

    /// Replaces the transform.
    pub fn set_transform(&mut self, transform: TransformConfig) {
        self.transform = transform;
    }

    /// The frame provider.
    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// The UV table provider.
    pub fn uv_tables(&self) -> &P {
        &self.uv_tables
    }

    /// Writes one color per point of `model` into `colors`.
    ///
    /// Without a frame nothing is written. Points outside the sample window get
    /// [`NO_COLOR`]. A point whose index is past the end of `colors` is skipped;
    /// if the table no longer matches `model`, a rebuild is requested for the
    /// next pass.
    pub fn render(&self, model: &dyn PointSource, colors: &mut [u32]) -> TickStats {
        let Some(frame) = self.frames.latest() else {
            return TickStats::default();
        };
        let table = self.uv_tables.uv_table(model);

        let mut stats = TickStats {
            frame: Some((frame.width(), frame.height())),
            ..TickStats::default()
        };
        for point in table.points() {
            let Some(slot) = colors.get_mut(point.index) else {
                stats.mismatched += 1;
                continue;
            };
            match sample(&frame, transform_uv(point.uv, &self.transform)) {
                Some(color) => {
                    *slot = color;
                    stats.sampled += 1;
                }
                None => {
                    *slot = NO_COLOR;
                    stats.blank += 1;
                }
            }
        }

        if stats.mismatched > 0 {
            // A table that still matches the model cannot be fixed by rebuilding;
            // the output buffer is short.
            let stale = !table.matches(model);
            log::debug!(
                "{} of {} points have no output slot (buffer holds {}){}",
                stats.mismatched,
                table.len(),
                colors.len(),
                if stale { ", requesting rebuild" } else { "" }
            );
            if stale {
                self.uv_tables.request_rebuild();
            }
        }
        stats
    }
}
