//! Point models the engine maps video onto.

use glam::Vec3;

use crate::geometry::bounding_box;

/// An ordered point set with stable indices.
///
/// The index of a point in [`PointSource::points`] is the slot its color is
/// written to. [`PointSource::revision`] must change whenever the point set is
/// structurally rebuilt; cached UV tables are keyed on it.
pub trait PointSource {
    /// Returns the points in iteration order.
    fn points(&self) -> &[Vec3];

    /// Returns a counter that changes on every structural change.
    fn revision(&self) -> u64;
}

/// A simple owned point model.
#[derive(Debug, Clone, Default)]
pub struct PointModel {
    points: Vec<Vec3>,
    revision: u64,
}

impl PointModel {
    /// Creates a model from points.
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            revision: 0,
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Replaces the point positions and bumps the revision.
    pub fn update_points(&mut self, points: Vec<Vec3>) {
        self.points = points;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Returns the axis-aligned bounding box, or `None` for an empty model.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        bounding_box(&self.points)
    }
}

impl PointSource for PointModel {
    fn points(&self) -> &[Vec3] {
        &self.points
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_bumps_revision() {
        let mut model = PointModel::new(vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(model.revision(), 0);
        assert_eq!(model.num_points(), 2);

        model.update_points(vec![Vec3::Y]);
        assert_eq!(model.revision(), 1);
        assert_eq!(model.points(), &[Vec3::Y]);
    }

    #[test]
    fn test_bounding_box() {
        let model = PointModel::new(vec![Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 0.0)]);
        assert_eq!(
            model.bounding_box(),
            Some((Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 2.0)))
        );
        assert!(PointModel::default().bounding_box().is_none());
    }
}
