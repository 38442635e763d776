use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel space, `(x0, y0)` top-left and `(x1, y1)`
/// bottom-right.
///
/// Boxes built through [`BoundingBox::from_corners`] or deserialized always
/// satisfy `x0 <= x1` and `y0 <= y1` with finite coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBox")]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Rejected box coordinates.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("invalid box ({x0}, {y0}) -> ({x1}, {y1}): corners must be finite and not inverted")]
pub struct InvalidBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Deserialize)]
struct RawBox {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl TryFrom<RawBox> for BoundingBox {
    type Error = InvalidBox;

    fn try_from(raw: RawBox) -> Result<Self, Self::Error> {
        let RawBox { x0, y0, x1, y1 } = raw;
        Self::from_corners(Point2::new(x0, y0), Point2::new(x1, y1))
            .ok_or(InvalidBox { x0, y0, x1, y1 })
    }
}

impl BoundingBox {
    /// Build a box from its top-left and bottom-right corners.
    ///
    /// Returns `None` for non-finite coordinates or inverted corners.
    pub fn from_corners(top_left: Point2<f64>, bottom_right: Point2<f64>) -> Option<Self> {
        let finite = [top_left.x, top_left.y, bottom_right.x, bottom_right.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return None;
        }
        Some(Self {
            x0: top_left.x,
            y0: top_left.y,
            x1: bottom_right.x,
            y1: bottom_right.y,
        })
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f64> {
        Point2::new(self.x0, self.y0)
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f64> {
        Point2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Half-open containment: `x0 <= x < x1` and `y0 <= y < y1`.
    ///
    /// Two boxes sharing an edge never both contain a point on that edge, and
    /// a zero-area box contains nothing.
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.x0 <= p.x && p.x < self.x1 && self.y0 <= p.y && p.y < self.y1
    }

    /// Grow the box outward by `amount` on every side.
    #[inline]
    pub fn grown(&self, amount: f64) -> Self {
        Self {
            x0: self.x0 - amount,
            y0: self.y0 - amount,
            x1: self.x1 + amount,
            y1: self.y1 + amount,
        }
    }
}
