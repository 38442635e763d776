//! High-level facade crate for the `setlens-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the engine crates
//! - file-level helpers that load a solver response and produce a report or
//!   answer a tap
//! - (feature `image`) painting ring instructions onto a photo
//! - (feature `cli`) the `setlens` command-line tool
//!
//! ## Quickstart
//!
//! ```no_run
//! use setlens::overlay::{parse, render_instructions, hit_test, RenderParams};
//! use setlens::core::{Point2, ViewTransform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = std::fs::read_to_string("response.json")?;
//! let snapshot = parse(&body)?;
//! let rings = render_instructions(&snapshot, &RenderParams::default());
//! println!("{} rings", rings.len());
//!
//! let view = ViewTransform::scale_translate(0.25, 0.25, 0.0, 120.0);
//! let label = hit_test(&snapshot, Point2::new(300.0, 400.0), &view)?;
//! println!("tapped: {label:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `setlens::core`: boxes, image-to-view transforms, logger.
//! - `setlens::overlay`: parser, membership, ring renderer, hit tester, session.
//! - `setlens::pipeline`: file helpers used by the CLI.
//! - `setlens::paint` (feature `image`): raster painting of ring instructions.

pub use setlens_core as core;
pub use setlens_overlay as overlay;

pub use setlens_overlay::{
    hit_test, parse, render_instructions, OverlaySession, OverlaySnapshot, ParseError,
    RenderParams, RingInstruction,
};

pub mod pipeline;

#[cfg(feature = "image")]
pub mod paint;
