use nalgebra::{Matrix3, Point2, Vector3};

/// Relative singularity threshold.
///
/// The linear part is singular when `|det| <= SINGULAR_DET_EPS * s^2`, where
/// `s` is its largest absolute coefficient. Uniform scaling does not change
/// the outcome, so a `1e-6` zoom inverts as well as a unit one.
pub const SINGULAR_DET_EPS: f64 = 1e-12;

/// Errors raised when building or inverting a [`ViewTransform`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    #[error("image-to-view transform is not invertible")]
    NonInvertibleTransform,
    #[error("transform bottom row must be [0, 0, 1]")]
    NotAffine,
}

/// Affine map from image (region) space to view space.
///
/// Stored as a 3×3 homogeneous matrix whose bottom row is always `[0, 0, 1]`.
/// The six free coefficients follow the row-major order used by most UI
/// toolkits: `[sx, kx, tx, ky, sy, ty]`, i.e.
///
/// ```text
/// | sx kx tx |
/// | ky sy ty |
/// | 0  0  1  |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    m: Matrix3<f64>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    pub fn from_coeffs(c: [f64; 6]) -> Self {
        Self {
            m: Matrix3::new(
                c[0], c[1], c[2], //
                c[3], c[4], c[5], //
                0.0, 0.0, 1.0,
            ),
        }
    }

    pub fn to_coeffs(&self) -> [f64; 6] {
        [
            self.m[(0, 0)],
            self.m[(0, 1)],
            self.m[(0, 2)],
            self.m[(1, 0)],
            self.m[(1, 1)],
            self.m[(1, 2)],
        ]
    }

    /// Accept a full homogeneous matrix. The bottom row must be exactly `[0, 0, 1]`.
    pub fn from_matrix(m: Matrix3<f64>) -> Result<Self, TransformError> {
        if m[(2, 0)] != 0.0 || m[(2, 1)] != 0.0 || m[(2, 2)] != 1.0 {
            return Err(TransformError::NotAffine);
        }
        Ok(Self { m })
    }

    pub fn from_array(rows: [[f64; 3]; 3]) -> Result<Self, TransformError> {
        Self::from_matrix(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    /// Scale then translate, the shape produced by "fit center" image views.
    pub fn scale_translate(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self::from_coeffs([sx, 0.0, tx, 0.0, sy, ty])
    }

    /// Rotation by `degrees` about the origin (positive is clockwise in a
    /// y-down view).
    pub fn rotation_deg(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_coeffs([c, -s, 0.0, s, c, 0.0])
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.m
    }

    /// Transform that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &ViewTransform) -> Self {
        Self { m: next.m * self.m }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0], v[1])
    }

    /// Determinant of the 2×2 linear part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)]
    }

    /// Inverse map (view space back to image space).
    pub fn inverse(&self) -> Result<Self, TransformError> {
        if self.m.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::NonInvertibleTransform);
        }
        let det = self.determinant();
        let scale = self.linear_scale();
        if !det.is_finite() || det.abs() <= SINGULAR_DET_EPS * scale * scale {
            return Err(TransformError::NonInvertibleTransform);
        }
        let inv = self
            .m
            .try_inverse()
            .ok_or(TransformError::NonInvertibleTransform)?;
        // Pin the bottom row against rounding drift.
        Self::from_coeffs([
            inv[(0, 0)],
            inv[(0, 1)],
            inv[(0, 2)],
            inv[(1, 0)],
            inv[(1, 1)],
            inv[(1, 2)],
        ])
        .into_checked()
    }

    /// Largest absolute coefficient of the 2×2 linear part.
    fn linear_scale(&self) -> f64 {
        [
            self.m[(0, 0)],
            self.m[(0, 1)],
            self.m[(1, 0)],
            self.m[(1, 1)],
        ]
        .iter()
        .fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }

    fn into_checked(self) -> Result<Self, TransformError> {
        if self.m.iter().all(|v| v.is_finite()) {
            Ok(self)
        } else {
            Err(TransformError::NonInvertibleTransform)
        }
    }
}

impl From<[f64; 6]> for ViewTransform {
    fn from(c: [f64; 6]) -> Self {
        Self::from_coeffs(c)
    }
}
