//! Solver response parsing.
//!
//! The upstream contract delivers each card as a 4-point polygon. Only point 0
//! (top-left) and point 2 (bottom-right) define the axis-aligned box; points 1
//! and 3 are read for shape validation and otherwise ignored.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use setlens_core::{BoundingBox, Point2};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::ParseError;
use crate::model::{GroupMatch, OverlaySnapshot, Region};

/// Wire shape of a solver response, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetectionResponse {
    /// Card label -> polygon corners `[[x, y]; 4]` in image pixels.
    pub cards: BTreeMap<String, Vec<[f64; 2]>>,
    /// Groups of three card labels, in solver order.
    pub sets: Vec<Vec<String>>,
}

impl RawDetectionResponse {
    /// Validate and build a snapshot. Fails as a whole; nothing partial leaks out.
    pub fn into_snapshot(self) -> Result<OverlaySnapshot, ParseError> {
        let mut regions = BTreeMap::new();
        for (label, polygon) in self.cards {
            let bbox = polygon_bbox(&label, &polygon)?;
            regions.insert(label.clone(), Region { label, bbox });
        }

        let mut groups = Vec::with_capacity(self.sets.len());
        for (ordinal, set) in self.sets.into_iter().enumerate() {
            let labels: [String; 3] = set.try_into().map_err(|set: Vec<String>| {
                ParseError::malformed(format!(
                    "group {ordinal} has {} labels, expected 3",
                    set.len()
                ))
            })?;
            if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
                return Err(ParseError::malformed(format!(
                    "group {ordinal} repeats a label: {labels:?}"
                )));
            }
            if let Some(missing) = labels.iter().find(|l| !regions.contains_key(l.as_str())) {
                return Err(ParseError::UnknownRegionReference {
                    ordinal,
                    label: missing.clone(),
                });
            }
            groups.push(GroupMatch { ordinal, labels });
        }

        debug!(
            "parsed solver response: {} regions, {} groups",
            regions.len(),
            groups.len()
        );
        Ok(OverlaySnapshot::new(regions, groups))
    }
}

fn polygon_bbox(label: &str, polygon: &[[f64; 2]]) -> Result<BoundingBox, ParseError> {
    let [top_left, _, bottom_right, _] = polygon else {
        return Err(ParseError::malformed(format!(
            "card {label:?} has {} polygon points, expected 4",
            polygon.len()
        )));
    };
    BoundingBox::from_corners(
        Point2::new(top_left[0], top_left[1]),
        Point2::new(bottom_right[0], bottom_right[1]),
    )
    .ok_or_else(|| {
        ParseError::malformed(format!(
            "card {label:?} has an inverted box: {top_left:?} -> {bottom_right:?}"
        ))
    })
}

/// Parse a solver response from JSON text.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(raw), fields(len = raw.len())))]
pub fn parse(raw: &str) -> Result<OverlaySnapshot, ParseError> {
    let response: RawDetectionResponse = serde_json::from_str(raw)?;
    response.into_snapshot()
}

/// Parse a solver response from a JSON byte buffer (an HTTP body, typically).
pub fn parse_slice(raw: &[u8]) -> Result<OverlaySnapshot, ParseError> {
    let response: RawDetectionResponse = serde_json::from_slice(raw)?;
    response.into_snapshot()
}

/// Parse an already-decoded JSON value.
pub fn parse_value(value: serde_json::Value) -> Result<OverlaySnapshot, ParseError> {
    let response: RawDetectionResponse = serde_json::from_value(value)?;
    response.into_snapshot()
}
