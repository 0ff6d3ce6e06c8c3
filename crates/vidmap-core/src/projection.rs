//! UV projection of a point model.
//!
//! Builds the per-point UV table the compositor samples through every tick, and
//! caches it until the model changes or a rebuild is requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::Bounds2;
use crate::model::PointSource;
use crate::plane::{fit_plane, Plane, RotationSpec};

/// Which coordinates feed the UV table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UvSource {
    /// The point's original model-space `x, y`. The fitted rotation is computed
    /// but does not affect the UVs.
    #[default]
    Original,
    /// The `x, y` of the point after rotating the fitted plane onto the
    /// canonical axis.
    Rotated,
}

/// How raw coordinates are rescaled into the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Normalization {
    /// Each axis is divided by its own range; both axes span `[0, 1]`.
    #[default]
    PerAxis,
    /// Both axes are divided by the larger range, preserving aspect ratio.
    Uniform,
}

/// Options controlling UV table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Coordinates the UVs are taken from.
    pub uv_source: UvSource,
    /// Rescaling applied to the raw coordinates.
    pub normalization: Normalization,
    /// Clamp the normal's dot product before `acos` when deriving the rotation.
    ///
    /// Off by default, so a normal that overshoots unit length gives NaN UVs
    /// in [`UvSource::Rotated`] mode.
    pub clamp_dot: bool,
}

impl ProjectionOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the UV source.
    pub fn with_uv_source(mut self, uv_source: UvSource) -> Self {
        self.uv_source = uv_source;
        self
    }

    /// Sets the normalization.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Sets whether the rotation clamps its dot product.
    pub fn with_clamped_dot(mut self, clamp_dot: bool) -> Self {
        self.clamp_dot = clamp_dot;
        self
    }
}

/// A UV coordinate for one model point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    /// Index of the point in the model (and in the output color buffer).
    pub index: usize,
    /// Renormalized UV coordinate.
    pub uv: Vec2,
}

/// The UV coordinates of a whole model, index-aligned with its points.
#[derive(Debug, Clone)]
pub struct UvTable {
    revision: u64,
    plane: Plane,
    rotation: RotationSpec,
    points: Vec<UvPoint>,
}

impl UvTable {
    /// Model revision this table was built from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The fitted plane.
    #[must_use]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// The normalized rotation derived from the fitted plane.
    #[must_use]
    pub fn rotation(&self) -> RotationSpec {
        self.rotation
    }

    /// UV entries in model iteration order.
    #[must_use]
    pub fn points(&self) -> &[UvPoint] {
        &self.points
    }

    /// Returns the UV of the point at `index`.
    #[must_use]
    pub fn uv(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).map(|p| p.uv)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns whether this table was built from the model's current geometry.
    pub fn matches(&self, model: &dyn PointSource) -> bool {
        self.revision == model.revision() && self.points.len() == model.points().len()
    }
}

/// Rescales coordinates in place so their observed minimum maps to 0.
///
/// With [`Normalization::PerAxis`] each axis' maximum maps to 1; with
/// [`Normalization::Uniform`] only the axis with the larger range reaches 1. An
/// axis with zero range maps to 0.5. NaN coordinates stay NaN.
pub fn renormalize(coords: &mut [Vec2], normalization: Normalization) {
    let Some(bounds) = Bounds2::from_points(coords.iter()) else {
        return;
    };

    let divisor = match normalization {
        Normalization::PerAxis => bounds.extent(),
        Normalization::Uniform => Vec2::splat(bounds.max_extent()),
    };

    let rescale = |value: f32, min: f32, divisor: f32| {
        if divisor == 0.0 {
            0.5
        } else {
            (value - min) / divisor
        }
    };

    for c in coords.iter_mut() {
        c.x = rescale(c.x, bounds.min.x, divisor.x);
        c.y = rescale(c.y, bounds.min.y, divisor.y);
    }
}

/// Projects `points` into a renormalized UV table.
#[must_use]
pub fn build_uv_table(points: &[Vec3], revision: u64, options: &ProjectionOptions) -> UvTable {
    let plane = fit_plane(points);
    let rotation = if options.clamp_dot {
        RotationSpec::to_canonical_clamped(&plane)
    } else {
        RotationSpec::to_canonical(&plane)
    }
    .normalized();

    let mut coords: Vec<Vec2> = match options.uv_source {
        UvSource::Original => points.iter().map(|p| p.truncate()).collect(),
        UvSource::Rotated => {
            // RotationSpec turns the canonical axis onto the normal; flattening needs the reverse.
            let flatten = rotation.inverse();
            points.iter().map(|p| flatten.rotate(*p).truncate()).collect()
        }
    };
    renormalize(&mut coords, options.normalization);

    UvTable {
        revision,
        plane,
        rotation,
        points: coords
            .into_iter()
            .enumerate()
            .map(|(index, uv)| UvPoint { index, uv })
            .collect(),
    }
}

/// Supplies the UV table for a model each tick.
pub trait UvTableProvider {
    /// Returns a table matching the model's current geometry.
    fn uv_table(&self, model: &dyn PointSource) -> Arc<UvTable>;

    /// Marks the current table stale so the next call rebuilds it.
    fn request_rebuild(&self);
}

impl<T: UvTableProvider + ?Sized> UvTableProvider for Arc<T> {
    fn uv_table(&self, model: &dyn PointSource) -> Arc<UvTable> {
        (**self).uv_table(model)
    }

    fn request_rebuild(&self) {
        (**self).request_rebuild();
    }
}

/// Caches the UV table of a model and rebuilds it on demand.
///
/// All methods take `&self`: a change-notification thread may call
/// [`ProjectionBuilder::invalidate`] or [`ProjectionBuilder::rebuild`] while the
/// render loop reads tables. New tables are built on the side and swapped in
/// whole, so a reader never sees a partially built table.
pub struct ProjectionBuilder {
    options: ArcSwap<ProjectionOptions>,
    table: ArcSwapOption<UvTable>,
    stale: AtomicBool,
}

impl ProjectionBuilder {
    /// Creates a builder with no cached table.
    pub fn new(options: ProjectionOptions) -> Self {
        Self {
            options: ArcSwap::from_pointee(options),
            table: ArcSwapOption::empty(),
            stale: AtomicBool::new(false),
        }
    }

    /// Returns the current projection options.
    pub fn options(&self) -> ProjectionOptions {
        **self.options.load()
    }

    /// Replaces the projection options and invalidates the cached table.
    pub fn set_options(&self, options: ProjectionOptions) {
        self.options.store(Arc::new(options));
        self.invalidate();
    }

    /// Marks the cached table stale.
    pub fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Returns whether a rebuild has been requested.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Returns the cached table without validating it against a model.
    pub fn cached(&self) -> Option<Arc<UvTable>> {
        self.table.load_full()
    }

    /// Drops the cached table.
    pub fn clear(&self) {
        self.table.store(None);
    }

    /// Returns the cached table if it still matches `model`, rebuilding otherwise.
    pub fn table_for(&self, model: &dyn PointSource) -> Arc<UvTable> {
        if !self.is_stale() {
            if let Some(table) = self.table.load_full() {
                if table.matches(model) {
                    return table;
                }
            }
        }
        self.rebuild(model)
    }

    /// Rebuilds the table from `model` and swaps it in.
    pub fn rebuild(&self, model: &dyn PointSource) -> Arc<UvTable> {
        // Cleared before building: an invalidation that lands mid-build survives.
        self.stale.store(false, Ordering::Release);

        let options = self.options();
        let table = Arc::new(build_uv_table(model.points(), model.revision(), &options));
        log::debug!(
            "rebuilt UV table: {} points, revision {}, normal {:?}, {:?}",
            table.len(),
            table.revision(),
            table.plane().normal,
            options
        );

        self.table.store(Some(Arc::clone(&table)));
        table
    }
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        Self::new(ProjectionOptions::default())
    }
}

impl UvTableProvider for ProjectionBuilder {
    fn uv_table(&self, model: &dyn PointSource) -> Arc<UvTable> {
        self.table_for(model)
    }

    fn request_rebuild(&self) {
        self.invalidate();
    }
}
