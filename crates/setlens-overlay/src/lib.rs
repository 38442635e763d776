//! Detection overlay and hit-testing engine.
//!
//! The pipeline, triggered once per solver response:
//! - [`parse`] validates a raw `{"cards": …, "sets": …}` payload and builds an
//!   immutable [`OverlaySnapshot`] (membership is resolved as part of it),
//! - [`render_instructions`] turns the snapshot into nested ring outlines,
//!   one ring per group a card belongs to,
//! - [`hit_test`] maps a view-space pointer back through the image-to-view
//!   transform and resolves it to a region label.
//!
//! [`OverlaySession`] wraps the three for a UI event loop: it keeps at most
//! one live snapshot and the label currently shown for a pressed pointer.
//!
//! Nothing here performs I/O except the explicit JSON helpers in [`io`].

mod audit;
mod card;
mod error;
mod hit_test;
pub mod io;
mod membership;
mod model;
mod parse;
mod render;
mod session;

pub use audit::GroupAudit;
pub use card::{
    find_sets, is_valid_set, CardColor, CardCount, CardFill, CardLabel, CardLabelError, CardShape,
};
pub use error::ParseError;
pub use hit_test::hit_test;
pub use membership::{resolve_membership, Membership};
pub use model::{GroupMatch, OverlaySnapshot, Region};
pub use parse::{parse, parse_slice, parse_value, RawDetectionResponse};
pub use render::{
    palette_color, render_instructions, RenderParams, RenderParamsError, Rgb, RingInstruction,
    DEFAULT_STROKE_WIDTH, SET_PALETTE,
};
pub use session::OverlaySession;

pub use setlens_core::{BoundingBox, Point2, TransformError, ViewTransform};
