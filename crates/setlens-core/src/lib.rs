//! Core geometry for the setlens overlay engine.
//!
//! This crate is intentionally small and purely geometric. It knows about
//! axis-aligned boxes in image pixel space and affine image-to-view
//! transforms, and nothing about detection payloads or drawing surfaces.

mod bbox;
mod logger;
mod transform;

pub use bbox::{BoundingBox, InvalidBox};
pub use transform::{TransformError, ViewTransform, SINGULAR_DET_EPS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};

/// Re-exported so downstream crates agree on the point type.
pub use nalgebra::Point2;
