use setlens_core::{Point2, TransformError, ViewTransform};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::model::OverlaySnapshot;

/// Resolve a view-space pointer to the label of the region under it.
///
/// `image_to_view` maps image pixels to view coordinates; the pointer is
/// pulled back through its inverse and tested with half-open containment
/// (`x0 <= x < x1`, `y0 <= y < y1`), so a point on a shared edge belongs to
/// the box on its right or below.
///
/// When several boxes contain the point, regions that belong to a group win
/// over those that do not, lower first-group ordinal wins among those, and
/// the smaller label breaks any remaining tie.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(snapshot, image_to_view), fields(x = view_point.x, y = view_point.y))
)]
pub fn hit_test<'a>(
    snapshot: &'a OverlaySnapshot,
    view_point: Point2<f64>,
    image_to_view: &ViewTransform,
) -> Result<Option<&'a str>, TransformError> {
    let p = image_to_view.inverse()?.apply(view_point);

    let hit = snapshot
        .regions()
        .filter(|r| r.bbox.contains(p))
        .min_by_key(|r| {
            let first = snapshot.memberships_of(&r.label).first().copied();
            (first.is_none(), first, r.label.as_str())
        })
        .map(|r| r.label.as_str());

    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_value;
    use serde_json::json;

    fn single_card() -> OverlaySnapshot {
        parse_value(json!({
            "cards": { "A": [[10, 10], [60, 10], [60, 60], [10, 60]] },
            "sets": []
        }))
        .expect("parse")
    }

    #[test]
    fn identity_transform_hits_inside_only() {
        let snap = single_card();
        let id = ViewTransform::identity();
        assert_eq!(hit_test(&snap, Point2::new(30.0, 30.0), &id), Ok(Some("A")));
        assert_eq!(hit_test(&snap, Point2::new(10.0, 10.0), &id), Ok(Some("A")));
        assert_eq!(hit_test(&snap, Point2::new(60.0, 60.0), &id), Ok(None));
        assert_eq!(hit_test(&snap, Point2::new(500.0, 500.0), &id), Ok(None));
    }

    #[test]
    fn pointer_is_pulled_back_through_the_view_transform() {
        let snap = single_card();
        // image shown at quarter scale, offset by (100, 40)
        let t = ViewTransform::scale_translate(0.25, 0.25, 100.0, 40.0);
        // image (30, 30) -> view (107.5, 47.5)
        assert_eq!(hit_test(&snap, Point2::new(107.5, 47.5), &t), Ok(Some("A")));
        // view (30, 30) is left of the image entirely
        assert_eq!(hit_test(&snap, Point2::new(30.0, 30.0), &t), Ok(None));
    }

    #[test]
    fn rotated_view_maps_back_correctly() {
        let snap = single_card();
        let rotate = ViewTransform::rotation_deg(90.0);
        let t = rotate.then(&ViewTransform::scale_translate(1.0, 1.0, 200.0, 0.0));
        let view = t.apply(Point2::new(20.0, 50.0));
        assert_eq!(hit_test(&snap, view, &t), Ok(Some("A")));
    }

    #[test]
    fn singular_transform_is_reported() {
        let snap = single_card();
        let t = ViewTransform::scale_translate(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            hit_test(&snap, Point2::new(30.0, 30.0), &t),
            Err(TransformError::NonInvertibleTransform)
        );
    }

    #[test]
    fn overlapping_boxes_resolve_by_group_then_label() {
        let snap = parse_value(json!({
            "cards": {
                "M": [[0, 0], [100, 0], [100, 100], [0, 100]],
                "N": [[0, 0], [100, 0], [100, 100], [0, 100]],
                "P": [[50, 50], [150, 50], [150, 150], [50, 150]],
                "Q": [[300, 0], [400, 0], [400, 100], [300, 100]],
                "R": [[500, 0], [600, 0], [600, 100], [500, 100]],
                "S": [[700, 0], [800, 0], [800, 100], [700, 100]]
            },
            "sets": [["Q", "R", "S"], ["P", "R", "S"]]
        }))
        .expect("parse");
        let id = ViewTransform::identity();

        // P is in group 1, M and N are in none.
        assert_eq!(hit_test(&snap, Point2::new(75.0, 75.0), &id), Ok(Some("P")));
        // only M and N: lexical order.
        assert_eq!(hit_test(&snap, Point2::new(10.0, 10.0), &id), Ok(Some("M")));
    }

    #[test]
    fn lower_first_ordinal_wins_overlap() {
        let snap = parse_value(json!({
            "cards": {
                "A": [[0, 0], [100, 0], [100, 100], [0, 100]],
                "B": [[0, 0], [100, 0], [100, 100], [0, 100]],
                "C": [[200, 0], [300, 0], [300, 100], [200, 100]],
                "D": [[400, 0], [500, 0], [500, 100], [400, 100]],
                "E": [[600, 0], [700, 0], [700, 100], [600, 100]]
            },
            "sets": [["B", "C", "D"], ["A", "C", "E"]]
        }))
        .expect("parse");
        let hit = hit_test(&snap, Point2::new(50.0, 50.0), &ViewTransform::identity());
        assert_eq!(hit, Ok(Some("B")));
    }
}
