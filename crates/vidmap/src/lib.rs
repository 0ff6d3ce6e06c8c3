//! vidmap-rs: map live video onto arbitrarily oriented 3D LED point models.
//!
//! A producer thread decodes frames and publishes them into a [`FrameMailbox`].
//! Once per render tick the [`Engine`] projects the model's points onto their
//! best-fit plane (cached as a UV table), runs every UV through the configured
//! [`TransformConfig`], and samples the newest frame into a caller-owned color
//! buffer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vidmap_rs::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let mut engine = Engine::new(EngineOptions::default());
//!     let source = TestPatternSource::new(CaptureOptions::default())?;
//!     let _producer = ProducerTask::spawn(
//!         "test pattern",
//!         Box::new(source),
//!         Arc::clone(engine.mailbox()),
//!         ProducerOptions::default(),
//!     )?;
//!
//!     let model = PointModel::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
//!     let mut colors = vec![NO_COLOR; model.num_points()];
//!     engine.tick(16.7, &model, &mut colors);
//!     Ok(())
//! }
//! ```
//!
//! # Pieces
//!
//! - [`fit_plane`] and [`RotationSpec`] orient the model
//! - [`ProjectionBuilder`] caches the per-point UV table
//! - [`transform_uv`] pans, zooms, flips, tiles and rotates the sample window
//! - [`sample`] and [`Compositor`] turn a frame into per-point colors

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod compositor;
mod engine;
mod sampler;

pub use compositor::{Compositor, TickStats};
pub use engine::Engine;
pub use sampler::sample;

// Re-export core types
pub use vidmap_core::{
    build_uv_table,
    color::{alpha, blue, green, red, rgb, NO_COLOR},
    fit_plane, transform_uv, EngineOptions, Normalization, Plane, PointModel, PointSource,
    ProjectionBuilder, ProjectionOptions, Result, RotationSpec, TransformConfig, UvPoint,
    UvSource, UvTable, UvTableProvider, Vec2, Vec3, VidmapError,
};

// Re-export frame exchange types
pub use vidmap_frame::{
    CaptureOptions, Frame, FrameError, FrameMailbox, FrameProvider, FrameResult, FrameSource,
    ImageSequenceSource, PixelFormat, ProducerOptions, ProducerTask, TestPatternSource,
};

/// Installs an `env_logger` logger configured from `RUST_LOG`.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("vidmap-rs logging initialized");
    }
}
