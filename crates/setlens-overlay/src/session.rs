//! Event-loop wrapper around the pure engine functions.

use std::sync::Arc;

use log::{debug, warn};
use setlens_core::{Point2, TransformError, ViewTransform};

use crate::error::ParseError;
use crate::hit_test::hit_test;
use crate::model::OverlaySnapshot;
use crate::parse::parse;
use crate::render::{render_instructions, RenderParams, RingInstruction};

/// Holds the live snapshot and the label shown for a pressed pointer.
///
/// A new snapshot replaces the old one in a single assignment, so queries see
/// either the previous response or the next one, never a mix. A rejected
/// response leaves the current snapshot untouched.
#[derive(Debug, Default)]
pub struct OverlaySession {
    params: RenderParams,
    snapshot: Option<Arc<OverlaySnapshot>>,
    pressed: Option<String>,
}

impl OverlaySession {
    pub fn new(params: RenderParams) -> Self {
        Self {
            params,
            snapshot: None,
            pressed: None,
        }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Currently live snapshot, shareable with a render thread.
    pub fn snapshot(&self) -> Option<Arc<OverlaySnapshot>> {
        self.snapshot.clone()
    }

    /// Parse a solver response and, on success, make it the live snapshot.
    pub fn apply_response(&mut self, raw: &str) -> Result<&OverlaySnapshot, ParseError> {
        match parse(raw) {
            Ok(snapshot) => Ok(self.replace(snapshot)),
            Err(err) => {
                warn!("rejected solver response, keeping previous overlay: {err}");
                Err(err)
            }
        }
    }

    /// Install an already-parsed snapshot.
    pub fn replace(&mut self, snapshot: OverlaySnapshot) -> &OverlaySnapshot {
        debug!(
            "overlay snapshot replaced: {} regions, {} groups",
            snapshot.len(),
            snapshot.groups().len()
        );
        self.pressed = None;
        self.snapshot.insert(Arc::new(snapshot))
    }

    /// Drop the snapshot, e.g. when a new capture starts.
    pub fn clear(&mut self) {
        self.snapshot = None;
        self.pressed = None;
    }

    /// Draw list for the live snapshot; empty when there is none.
    pub fn render_instructions(&self) -> Vec<RingInstruction> {
        self.snapshot
            .as_deref()
            .map(|s| render_instructions(s, &self.params))
            .unwrap_or_default()
    }

    /// Hit test against the live snapshot; `Ok(None)` when there is none.
    pub fn hit_test(
        &self,
        view_point: Point2<f64>,
        image_to_view: &ViewTransform,
    ) -> Result<Option<&str>, TransformError> {
        match self.snapshot.as_deref() {
            Some(snapshot) => hit_test(snapshot, view_point, image_to_view),
            None => Ok(None),
        }
    }

    /// Pointer pressed: remember and return the label under it.
    ///
    /// A non-invertible transform is logged and treated as "no region".
    pub fn pointer_down(
        &mut self,
        view_point: Point2<f64>,
        image_to_view: &ViewTransform,
    ) -> Option<&str> {
        self.pressed = match self.hit_test(view_point, image_to_view) {
            Ok(label) => label.map(str::to_owned),
            Err(err) => {
                warn!("hit test skipped: {err}");
                None
            }
        };
        self.pressed.as_deref()
    }

    /// Pointer released: nothing is shown any more.
    pub fn pointer_up(&mut self) {
        self.pressed = None;
    }

    /// Label currently shown for a pressed pointer.
    pub fn pressed_label(&self) -> Option<&str> {
        self.pressed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{
        "cards": {
            "A": [[10, 10], [60, 10], [60, 60], [10, 60]],
            "B": [[100, 10], [150, 10], [150, 60], [100, 60]],
            "C": [[200, 10], [250, 10], [250, 60], [200, 60]]
        },
        "sets": [["A", "B", "C"]]
    }"#;

    const DANGLING: &str = r#"{
        "cards": {
            "A": [[10, 10], [60, 10], [60, 60], [10, 60]],
            "B": [[100, 10], [150, 10], [150, 60], [100, 60]]
        },
        "sets": [["A", "B", "Z"]]
    }"#;

    #[test]
    fn empty_session_reports_nothing() {
        let session = OverlaySession::default();
        assert!(session.snapshot().is_none());
        assert!(session.render_instructions().is_empty());
        assert_eq!(
            session.hit_test(Point2::new(30.0, 30.0), &ViewTransform::identity()),
            Ok(None)
        );
    }

    #[test]
    fn failed_parse_keeps_previous_snapshot() {
        let mut session = OverlaySession::default();
        session.apply_response(GOOD).expect("good response");
        let before = session.render_instructions();

        let err = session
            .apply_response(DANGLING)
            .expect_err("dangling label");
        assert!(matches!(err, ParseError::UnknownRegionReference { .. }));

        let snap = session.snapshot().expect("still live");
        assert_eq!(snap.len(), 3);
        assert_eq!(session.render_instructions(), before);
        assert_eq!(
            session.hit_test(Point2::new(120.0, 30.0), &ViewTransform::identity()),
            Ok(Some("B"))
        );
    }

    #[test]
    fn pointer_down_shows_label_until_up() {
        let mut session = OverlaySession::default();
        session.apply_response(GOOD).expect("good response");
        let id = ViewTransform::identity();

        let tap = Point2::new(30.0, 30.0);
        assert_eq!(session.pointer_down(tap, &id), Some("A"));
        assert_eq!(session.pressed_label(), Some("A"));
        session.pointer_up();
        assert_eq!(session.pressed_label(), None);

        assert_eq!(session.pointer_down(Point2::new(80.0, 30.0), &id), None);
    }

    #[test]
    fn pointer_down_with_singular_transform_shows_nothing() {
        let mut session = OverlaySession::default();
        session.apply_response(GOOD).expect("good response");
        let singular = ViewTransform::scale_translate(0.0, 1.0, 0.0, 0.0);
        let tap = Point2::new(30.0, 30.0);
        assert_eq!(session.pointer_down(tap, &singular), None);
    }

    #[test]
    fn new_snapshot_clears_stale_touch_state() {
        let mut session = OverlaySession::default();
        session.apply_response(GOOD).expect("good response");
        session.pointer_down(Point2::new(30.0, 30.0), &ViewTransform::identity());
        session.apply_response(GOOD).expect("good response");
        assert_eq!(session.pressed_label(), None);
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let mut session = OverlaySession::default();
        session.apply_response(GOOD).expect("good response");
        let held = session.snapshot().expect("live");
        session
            .apply_response(r#"{"cards": {}, "sets": []}"#)
            .expect("empty response");
        assert_eq!(held.len(), 3);
        assert!(session.snapshot().expect("live").is_empty());

        session.clear();
        assert!(session.snapshot().is_none());
    }
}
