//! The host-facing mapping engine.

use std::sync::Arc;

use vidmap_core::{
    EngineOptions, PointSource, ProjectionBuilder, ProjectionOptions, TransformConfig,
};
use vidmap_frame::FrameMailbox;

use crate::compositor::{Compositor, TickStats};

/// Maps the latest published frame onto a point model once per tick.
///
/// The engine owns the frame mailbox and the UV table cache. Hand
/// [`Engine::mailbox`] to a producer thread and [`Engine::projection`] to
/// whatever watches the model for geometry changes; the render loop only calls
/// [`Engine::tick`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vidmap_rs::*;
///
/// let mut engine = Engine::new(EngineOptions::default());
/// let model = PointModel::new(vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)]);
/// let mut colors = vec![NO_COLOR; model.num_points()];
///
/// let frame = Frame::from_packed_rgb(1, 1, vec![0x00FF_8000]).unwrap();
/// engine.mailbox().publish(Arc::new(frame));
/// engine.tick(16.0, &model, &mut colors);
/// assert!(colors.iter().all(|&c| c == rgb(255, 128, 0)));
/// ```
pub struct Engine {
    compositor: Compositor<Arc<FrameMailbox>, Arc<ProjectionBuilder>>,
    mailbox: Arc<FrameMailbox>,
    projection: Arc<ProjectionBuilder>,
    elapsed_ms: f64,
}

impl Engine {
    /// Creates an engine with an empty mailbox and no cached UV table.
    pub fn new(options: EngineOptions) -> Self {
        let mailbox = Arc::new(FrameMailbox::new());
        let projection = Arc::new(ProjectionBuilder::new(options.projection));
        let compositor = Compositor::new(Arc::clone(&mailbox), Arc::clone(&projection))
            .with_transform(sanitize_transform(&options.transform));
        Self {
            compositor,
            mailbox,
            projection,
            elapsed_ms: 0.0,
        }
    }

    /// The mailbox producers publish frames into.
    pub fn mailbox(&self) -> &Arc<FrameMailbox> {
        &self.mailbox
    }

    /// The UV table cache.
    pub fn projection(&self) -> &Arc<ProjectionBuilder> {
        &self.projection
    }

    /// The transform currently applied to every point.
    pub fn transform(&self) -> &TransformConfig {
        self.compositor.transform()
    }

    /// Total time passed to [`Engine::tick`], in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Renders the latest frame into `colors`, indexed by point index.
    ///
    /// Never blocks and never fails. Without a frame the buffer is left as is.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        model: &dyn PointSource,
        colors: &mut [u32],
    ) -> TickStats {
        self.elapsed_ms += delta_ms;
        self.compositor.render(model, colors)
    }

    /// Replaces the UV transform. Out-of-range fields are clamped.
    pub fn set_transform(&mut self, transform: TransformConfig) {
        self.compositor.set_transform(sanitize_transform(&transform));
    }

    /// Replaces the projection options; the next tick rebuilds the UV table.
    pub fn set_projection(&self, options: ProjectionOptions) {
        self.projection.set_options(options);
    }

    /// Signals that the model geometry changed; the next tick rebuilds the UV table.
    pub fn invalidate_geometry(&self) {
        log::debug!("geometry change requested a UV table rebuild");
        self.projection.invalidate();
    }

    /// Releases the current frame and the cached UV table.
    ///
    /// The engine stays usable: ticks are no-ops until a new frame arrives.
    pub fn dispose(&mut self) {
        self.mailbox.clear();
        self.projection.clear();
        log::info!("vidmap engine disposed after {:.0} ms", self.elapsed_ms);
    }
}

/// Clamps `transform` to valid ranges, warning when anything changed.
fn sanitize_transform(transform: &TransformConfig) -> TransformConfig {
    let sanitized = transform.sanitized();
    if sanitized != *transform {
        log::warn!("transform clamped to valid ranges: {sanitized:?}");
    }
    sanitized
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
