//! Shared geometry helpers used by plane fitting and projection.

use glam::{Vec2, Vec3};

/// Rotates `v` about a unit `axis` by `angle` radians using Rodrigues' formula.
///
/// `v·cosθ + (axis×v)·sinθ + axis·(axis·v)·(1−cosθ)`
///
/// The axis is not re-normalized here; a non-unit axis scales the result.
#[must_use]
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

/// Returns the axis-aligned bounding box of a point set.
///
/// Returns `None` for an empty set.
#[must_use]
pub fn bounding_box(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}

/// Axis-aligned bounds of a 2D coordinate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Per-axis minimum.
    pub min: Vec2,
    /// Per-axis maximum.
    pub max: Vec2,
}

impl Bounds2 {
    /// Scans a coordinate set for its per-axis minimum and maximum.
    ///
    /// NaN coordinates are skipped by `f32::min`/`f32::max` unless every
    /// value on an axis is NaN. Returns `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Per-axis range (`max - min`).
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    /// The larger of the two axis ranges.
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }
}
