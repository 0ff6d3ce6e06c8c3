//! Approximate plane fitting for LED point models.
//!
//! The fit is deliberately cheap: it takes the first, middle, and last point in
//! iteration order and uses their triangle's normal. It is sensitive to point
//! ordering and outliers, and the resulting UV layout depends on that choice, so
//! it is kept as-is rather than replaced with a least-squares fit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::rotate_about_axis;

/// The axis fitted plane normals are rotated onto.
pub const CANONICAL_AXIS: Vec3 = Vec3::Z;

/// Axis lengths below this are treated as a parallel/antiparallel normal.
const DEGENERATE_AXIS_EPSILON: f32 = 1e-6;

/// A fitted plane, described by its normal.
///
/// The normal is unit length for well-formed input, zero for fewer than three
/// points, and NaN when the three sampled points are collinear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal.
    pub normal: Vec3,
}

impl Plane {
    /// Returns whether the normal is finite and non-zero.
    #[must_use]
    pub fn is_well_defined(&self) -> bool {
        self.normal.is_finite() && self.normal.length_squared() > 0.0
    }
}

/// Fits a plane through the first, middle, and last point of `points`.
///
/// Fewer than three points produce a zero normal. Collinear samples produce a NaN
/// normal; neither case panics.
#[must_use]
pub fn fit_plane(points: &[Vec3]) -> Plane {
    if points.len() < 3 {
        return Plane { normal: Vec3::ZERO };
    }

    let first = points[0];
    let middle = points[points.len() / 2];
    let last = points[points.len() - 1];

    let normal = (middle - first).cross(last - first).normalize();
    Plane { normal }
}

/// An angle-axis rotation.
///
/// As produced by [`RotationSpec::to_canonical`] the axis is not unit length;
/// call [`RotationSpec::normalized`] before rotating anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSpec {
    /// Rotation axis.
    pub axis: Vec3,
    /// Rotation angle in radians.
    pub angle: f32,
}

impl RotationSpec {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        axis: CANONICAL_AXIS,
        angle: 0.0,
    };

    /// Derives the rotation relating [`CANONICAL_AXIS`] and the plane normal.
    ///
    /// The axis is `canonical × normal` and the angle `acos(canonical · normal)`,
    /// so rotating the canonical axis by this rotation lands on the normal. The dot
    /// product is not clamped: floating-point overshoot past 1 yields a NaN angle.
    #[must_use]
    pub fn to_canonical(plane: &Plane) -> Self {
        let axis = CANONICAL_AXIS.cross(plane.normal);
        let angle = CANONICAL_AXIS.dot(plane.normal).acos();
        Self { axis, angle }
    }

    /// Like [`RotationSpec::to_canonical`], but clamps the dot product to
    /// `[-1, 1]` first. NaN normals still give a NaN angle.
    #[must_use]
    pub fn to_canonical_clamped(plane: &Plane) -> Self {
        let axis = CANONICAL_AXIS.cross(plane.normal);
        let angle = CANONICAL_AXIS.dot(plane.normal).clamp(-1.0, 1.0).acos();
        Self { axis, angle }
    }

    /// Returns this rotation with a unit-length axis.
    ///
    /// A vanishing axis means the normal was parallel or antiparallel to the
    /// canonical axis: the former becomes the identity, the latter a half turn
    /// about +X. NaN axes stay NaN.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.axis.length() < DEGENERATE_AXIS_EPSILON {
            return if self.angle < std::f32::consts::FRAC_PI_2 {
                Self::IDENTITY
            } else {
                Self {
                    axis: Vec3::X,
                    angle: std::f32::consts::PI,
                }
            };
        }
        Self {
            axis: self.axis.normalize(),
            angle: self.angle,
        }
    }

    /// Returns the opposite rotation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            axis: self.axis,
            angle: -self.angle,
        }
    }

    /// Returns whether this rotation leaves points unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    /// Rotates a point. The axis must already be unit length.
    #[must_use]
    pub fn rotate(&self, point: Vec3) -> Vec3 {
        rotate_about_axis(point, self.axis, self.angle)
    }
}

impl Default for RotationSpec {
    fn default() -> Self {
        Self::IDENTITY
    }
}
