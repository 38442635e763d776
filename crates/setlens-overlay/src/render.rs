//! Ring layout for group highlights.
//!
//! A card that belongs to `k` groups gets `k` concentric outlines. Ring `i`
//! is the card box grown by `i * ring_spacing`, so the innermost ring belongs
//! to the first group the card was listed in.

use log::debug;
use serde::{Deserialize, Serialize};
use setlens_core::BoundingBox;

use crate::model::OverlaySnapshot;

/// Outline width used by the capture app; also the default ring step.
pub const DEFAULT_STROKE_WIDTH: f64 = 50.0;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Cyclic highlight palette; group ordinal `o` uses `SET_PALETTE[o % 6]`.
pub const SET_PALETTE: [Rgb; 6] = [
    Rgb(139, 214, 242),
    Rgb(139, 242, 167),
    Rgb(242, 167, 139),
    Rgb(242, 139, 214),
    Rgb(242, 219, 139),
    Rgb(123, 247, 222),
];

/// Palette index and color for a group ordinal.
#[inline]
pub fn palette_color(ordinal: usize) -> (usize, Rgb) {
    let idx = ordinal % SET_PALETTE.len();
    (idx, SET_PALETTE[idx])
}

/// Stroke settings for the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Outline width in image pixels, identical for every ring.
    pub stroke_width: f64,
    /// Outward growth between consecutive rings of the same card.
    pub ring_spacing: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            ring_spacing: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// A stroke setting that is negative or not finite.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("render parameter `{field}` must be finite and non-negative, got {value}")]
pub struct RenderParamsError {
    pub field: &'static str,
    pub value: f64,
}

impl RenderParams {
    /// Check that both settings are finite and non-negative.
    pub fn validate(&self) -> Result<(), RenderParamsError> {
        for (field, value) in [
            ("stroke_width", self.stroke_width),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderParamsError { field, value });
            }
        }
        Ok(())
    }
}

/// Invalid settings draw as zero so rings never turn inside out.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// One outline to paint: a rectangle stroke centered on `bbox`'s edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingInstruction {
    pub label: String,
    pub bbox: BoundingBox,
    /// Index into [`SET_PALETTE`].
    pub color_index: usize,
    pub color: Rgb,
    pub stroke_width: f64,
    /// Group this ring stands for.
    pub ordinal: usize,
}

/// Build the draw list for a snapshot.
///
/// Regions are visited in ascending label order and each region's rings are
/// emitted innermost first. When boxes overlap, later instructions are meant
/// to be painted on top of earlier ones.
///
/// Settings rejected by [`RenderParams::validate`] are treated as zero here.
pub fn render_instructions(
    snapshot: &OverlaySnapshot,
    params: &RenderParams,
) -> Vec<RingInstruction> {
    let stroke_width = non_negative(params.stroke_width);
    let ring_spacing = non_negative(params.ring_spacing);
    let mut out = Vec::new();
    for region in snapshot.regions() {
        for (i, &ordinal) in snapshot.memberships_of(&region.label).iter().enumerate() {
            let (color_index, color) = palette_color(ordinal);
            out.push(RingInstruction {
                label: region.label.clone(),
                bbox: region.bbox.grown(i as f64 * ring_spacing),
                color_index,
                color,
                stroke_width,
                ordinal,
            });
        }
    }
    debug!(
        "rendered {} rings for {} regions",
        out.len(),
        snapshot.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_value;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn overlapping_groups() -> OverlaySnapshot {
        parse_value(json!({
            "cards": {
                "A": [[100, 100], [200, 100], [200, 250], [100, 250]],
                "B": [[400, 100], [500, 100], [500, 250], [400, 250]],
                "C": [[700, 100], [800, 100], [800, 250], [700, 250]],
                "D": [[100, 400], [200, 400], [200, 550], [100, 550]],
                "E": [[400, 400], [500, 400], [500, 550], [400, 550]],
                "F": [[700, 400], [800, 400], [800, 550], [700, 550]]
            },
            "sets": [["A", "B", "C"], ["A", "D", "E"]]
        }))
        .expect("parse")
    }

    #[test]
    fn two_memberships_yield_two_nested_rings() {
        let snap = overlapping_groups();
        let params = RenderParams::default();
        let rings: Vec<_> = render_instructions(&snap, &params)
            .into_iter()
            .filter(|r| r.label == "A")
            .collect();

        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].color, SET_PALETTE[0]);
        assert_eq!(rings[1].color, SET_PALETTE[1]);
        assert_eq!(rings[0].bbox, snap.region("A").expect("A").bbox);

        let (inner, outer) = (rings[0].bbox, rings[1].bbox);
        assert_abs_diff_eq!(inner.x0 - outer.x0, params.ring_spacing);
        assert_abs_diff_eq!(inner.y0 - outer.y0, params.ring_spacing);
        assert_abs_diff_eq!(outer.x1 - inner.x1, params.ring_spacing);
        assert_abs_diff_eq!(outer.y1 - inner.y1, params.ring_spacing);
    }

    #[test]
    fn regions_without_groups_draw_nothing() {
        let snap = overlapping_groups();
        let rings = render_instructions(&snap, &RenderParams::default());
        assert!(rings.iter().all(|r| r.label != "F"));
        // A: 2, B: 1, C: 1, D: 1, E: 1
        assert_eq!(rings.len(), 6);
    }

    #[test]
    fn stroke_width_is_uniform() {
        let params = RenderParams {
            stroke_width: 12.0,
            ring_spacing: 20.0,
        };
        let rings = render_instructions(&overlapping_groups(), &params);
        assert!(rings.iter().all(|r| r.stroke_width == 12.0));
    }

    #[test]
    fn palette_wraps_after_six_groups() {
        assert_eq!(palette_color(0), (0, SET_PALETTE[0]));
        assert_eq!(palette_color(5), (5, SET_PALETTE[5]));
        assert_eq!(palette_color(6), (0, SET_PALETTE[0]));
        assert_eq!(palette_color(13), (1, SET_PALETTE[1]));
    }

    #[test]
    fn instructions_are_ordered_by_label_then_ring() {
        let rings = render_instructions(&overlapping_groups(), &RenderParams::default());
        let order: Vec<(&str, usize)> = rings
            .iter()
            .map(|r| (r.label.as_str(), r.ordinal))
            .collect();
        assert_eq!(
            order,
            vec![("A", 0), ("A", 1), ("B", 0), ("C", 0), ("D", 1), ("E", 1)]
        );
    }

    #[test]
    fn negative_or_nan_settings_are_rejected() {
        let raw = r#"{"ring_spacing": -100.0}"#;
        let p: RenderParams = serde_json::from_str(raw).expect("params");
        assert_eq!(
            p.validate(),
            Err(RenderParamsError {
                field: "ring_spacing",
                value: -100.0
            })
        );

        let nan = RenderParams {
            stroke_width: f64::NAN,
            ring_spacing: 10.0,
        };
        let err = nan.validate().expect_err("NaN stroke");
        assert_eq!(err.field, "stroke_width");
        assert!(RenderParams::default().validate().is_ok());
    }

    #[test]
    fn invalid_settings_still_nest_rings_outward() {
        let snap = overlapping_groups();
        for params in [
            RenderParams {
                stroke_width: -4.0,
                ring_spacing: -100.0,
            },
            RenderParams {
                stroke_width: f64::NAN,
                ring_spacing: f64::INFINITY,
            },
        ] {
            let rings = render_instructions(&snap, &params);
            for ring in &rings {
                assert!(ring.bbox.x0 <= ring.bbox.x1);
                assert!(ring.bbox.y0 <= ring.bbox.y1);
                assert_eq!(ring.stroke_width, 0.0);
            }
            let a: Vec<_> = rings.iter().filter(|r| r.label == "A").collect();
            assert_eq!(a[1].bbox, a[0].bbox);
        }
    }

    #[test]
    fn render_params_fill_missing_fields_from_defaults() {
        let p: RenderParams = serde_json::from_str(r#"{"stroke_width": 8.0}"#).expect("params");
        assert_eq!(p.stroke_width, 8.0);
        assert_eq!(p.ring_spacing, DEFAULT_STROKE_WIDTH);
    }
}
