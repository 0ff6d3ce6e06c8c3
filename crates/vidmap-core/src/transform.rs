//! The UV transform applied to every point before sampling.
//!
//! The order of operations is fixed: flip, tile, rotate about the center, then
//! offset and scale. Results are not clamped; the sampler treats anything that
//! falls outside the frame as "no color", which is what makes offset and scale
//! pan and zoom the video window across the model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VidmapError};

/// Center the rotate step turns around.
const ROTATION_CENTER: Vec2 = Vec2::splat(0.5);

/// Configuration for the UV transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Horizontal translation of the sample window.
    pub u_offset: f32,
    /// Vertical translation of the sample window.
    pub v_offset: f32,
    /// Horizontal scale of the sample window.
    pub u_width: f32,
    /// Vertical scale of the sample window.
    pub v_height: f32,
    /// Mirror horizontally before sampling.
    pub flip_horizontal: bool,
    /// Mirror vertically before sampling.
    pub flip_vertical: bool,
    /// Horizontal tile count (at least 1).
    pub tile_x: u32,
    /// Vertical tile count (at least 1).
    pub tile_y: u32,
    /// Rotation about (0.5, 0.5), as a fraction of a full turn in `[0, 1]`.
    pub rotate: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            u_offset: 0.0,
            v_offset: 0.0,
            u_width: 1.0,
            v_height: 1.0,
            flip_horizontal: false,
            flip_vertical: false,
            tile_x: 1,
            tile_y: 1,
            rotate: 0.0,
        }
    }
}

impl TransformConfig {
    /// Creates the identity configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sample window offset.
    pub fn with_offset(mut self, u_offset: f32, v_offset: f32) -> Self {
        self.u_offset = u_offset;
        self.v_offset = v_offset;
        self
    }

    /// Sets the sample window scale.
    pub fn with_scale(mut self, u_width: f32, v_height: f32) -> Self {
        self.u_width = u_width;
        self.v_height = v_height;
        self
    }

    /// Sets the mirror flags.
    pub fn with_flip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.flip_horizontal = horizontal;
        self.flip_vertical = vertical;
        self
    }

    /// Sets the tile counts.
    pub fn with_tiles(mut self, tile_x: u32, tile_y: u32) -> Self {
        self.tile_x = tile_x;
        self.tile_y = tile_y;
        self
    }

    /// Sets the rotation as a fraction of a full turn.
    pub fn with_rotate(mut self, rotate: f32) -> Self {
        self.rotate = rotate;
        self
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("u_offset", self.u_offset),
            ("v_offset", self.v_offset),
            ("u_width", self.u_width),
            ("v_height", self.v_height),
            ("rotate", self.rotate),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(VidmapError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.tile_x < 1 || self.tile_y < 1 {
            return Err(VidmapError::InvalidConfig(format!(
                "tile counts must be at least 1, got {}x{}",
                self.tile_x, self.tile_y
            )));
        }
        if !(0.0..=1.0).contains(&self.rotate) {
            return Err(VidmapError::InvalidConfig(format!(
                "rotate must be within [0, 1], got {}",
                self.rotate
            )));
        }
        Ok(())
    }

    /// Returns a copy with every field forced into its valid range.
    ///
    /// Non-finite numbers fall back to their identity value.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let identity = Self::default();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };
        Self {
            u_offset: finite_or(self.u_offset, identity.u_offset),
            v_offset: finite_or(self.v_offset, identity.v_offset),
            u_width: finite_or(self.u_width, identity.u_width),
            v_height: finite_or(self.v_height, identity.v_height),
            flip_horizontal: self.flip_horizontal,
            flip_vertical: self.flip_vertical,
            tile_x: self.tile_x.max(1),
            tile_y: self.tile_y.max(1),
            rotate: finite_or(self.rotate, identity.rotate).clamp(0.0, 1.0),
        }
    }

    /// Rotation angle in radians.
    #[must_use]
    pub fn rotation_radians(&self) -> f32 {
        self.rotate * std::f32::consts::TAU
    }
}

/// Maps a base UV coordinate to the coordinate to sample.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transform_uv(uv: Vec2, config: &TransformConfig) -> Vec2 {
    let mut u = uv.x;
    let mut v = uv.y;

    if config.flip_horizontal {
        u = 1.0 - u;
    }
    if config.flip_vertical {
        v = 1.0 - v;
    }

    if config.tile_x > 1 {
        u = (u * config.tile_x as f32).rem_euclid(1.0);
    }
    if config.tile_y > 1 {
        v = (v * config.tile_y as f32).rem_euclid(1.0);
    }

    let mut uv = Vec2::new(u, v);
    if config.rotate > 0.0 {
        let rotation = Vec2::from_angle(config.rotation_radians());
        uv = ROTATION_CENTER + rotation.rotate(uv - ROTATION_CENTER);
    }

    Vec2::new(
        config.u_offset + uv.x * config.u_width,
        config.v_offset + uv.y * config.v_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_is_identity() {
        let config = TransformConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(transform_uv(Vec2::new(0.25, 0.8), &config), Vec2::new(0.25, 0.8));
    }

    #[test]
    fn test_flip() {
        let config = TransformConfig::new().with_flip(true, false);
        assert_close(transform_uv(Vec2::new(0.2, 0.3), &config), Vec2::new(0.8, 0.3));

        let config = TransformConfig::new().with_flip(false, true);
        assert_close(transform_uv(Vec2::new(0.2, 0.3), &config), Vec2::new(0.2, 0.7));
    }

    #[test]
    fn test_tiling_wraps() {
        let config = TransformConfig::new().with_tiles(2, 1);
        assert_close(transform_uv(Vec2::new(0.75, 0.75), &config), Vec2::new(0.5, 0.75));

        let config = TransformConfig::new().with_tiles(3, 4);
        assert_close(transform_uv(Vec2::new(0.5, 0.5), &config), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_quarter_turn() {
        let config = TransformConfig::new().with_rotate(0.25);
        assert_close(transform_uv(Vec2::new(1.0, 0.5), &config), Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_center_is_rotation_invariant() {
        let config = TransformConfig::new().with_rotate(0.37);
        assert_close(transform_uv(Vec2::splat(0.5), &config), Vec2::splat(0.5));
    }

    #[test]
    fn test_offset_and_scale_apply_last() {
        let config = TransformConfig::new()
            .with_flip(true, false)
            .with_offset(0.1, -0.2)
            .with_scale(0.5, 2.0);
        // flip: (0.8, 0.4) -> offset/scale: (0.1 + 0.4, -0.2 + 0.8)
        assert_close(transform_uv(Vec2::new(0.2, 0.4), &config), Vec2::new(0.5, 0.6));
    }

    #[test]
    fn test_output_is_not_clamped() {
        let config = TransformConfig::new().with_offset(2.0, 0.0);
        assert_close(transform_uv(Vec2::new(0.5, 0.5), &config), Vec2::new(2.5, 0.5));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(TransformConfig::new().with_tiles(0, 1).validate().is_err());
        assert!(TransformConfig::new().with_rotate(1.5).validate().is_err());
        assert!(TransformConfig::new().with_offset(f32::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = TransformConfig::new()
            .with_tiles(0, 3)
            .with_rotate(-0.5)
            .with_scale(f32::INFINITY, 2.0)
            .sanitized();
        assert_eq!(config.tile_x, 1);
        assert_eq!(config.tile_y, 3);
        assert_eq!(config.rotate, 0.0);
        assert_eq!(config.u_width, 1.0);
        assert_eq!(config.v_height, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_uses_defaults_for_missing_fields() {
        let config: TransformConfig = serde_json::from_str(r#"{ "tile_x": 2, "rotate": 0.5 }"#).unwrap();
        assert_eq!(config.tile_x, 2);
        assert_eq!(config.tile_y, 1);
        assert_eq!(config.u_width, 1.0);
        assert_eq!(config.rotate, 0.5);
    }

    proptest! {
        #[test]
        fn prop_identity_config(u in -2.0f32..2.0, v in -2.0f32..2.0) {
            let out = transform_uv(Vec2::new(u, v), &TransformConfig::default());
            prop_assert_eq!(out, Vec2::new(u, v));
        }

        #[test]
        fn prop_tiled_coordinates_stay_in_unit_range(
            u in 0.0f32..=1.0,
            v in 0.0f32..=1.0,
            tx in 2u32..16,
            ty in 2u32..16,
        ) {
            let out = transform_uv(Vec2::new(u, v), &TransformConfig::new().with_tiles(tx, ty));
            prop_assert!((0.0..1.0).contains(&out.x));
            prop_assert!((0.0..1.0).contains(&out.y));
        }
    }
}
