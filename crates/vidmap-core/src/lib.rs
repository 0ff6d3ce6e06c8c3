//! Core geometry for vidmap-rs.
//!
//! This crate provides the pure, render-loop-side pieces of the mapping engine:
//! - [`fit_plane`] and [`RotationSpec`] for orienting an LED point model
//! - [`ProjectionBuilder`] for the cached per-point UV table
//! - [`transform_uv`] and [`TransformConfig`] for panning, zooming, tiling and
//!   rotating the sample window
//! - Packed output colors, engine options and error types

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod model;
pub mod options;
pub mod plane;
pub mod projection;
pub mod transform;

pub use error::{Result, VidmapError};
pub use geometry::{bounding_box, rotate_about_axis, Bounds2};
pub use model::{PointModel, PointSource};
pub use options::EngineOptions;
pub use plane::{fit_plane, Plane, RotationSpec, CANONICAL_AXIS};
pub use projection::{
    build_uv_table, renormalize, Normalization, ProjectionBuilder, ProjectionOptions, UvPoint,
    UvSource, UvTable, UvTableProvider,
};
pub use transform::{transform_uv, TransformConfig};

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
