//! OKLab perceptual color space and its polar form OKLch.
//!
//! Forward path: linear sRGB -> LMS (matrix) -> cube root -> OKLab (matrix).
//! The inverse reverses each step. OKLch expresses `(a, b)` as chroma and
//! hue angle, which lets the correction pass swap lightness and chroma
//! while keeping hue fixed.
//!
//! # Reference
//!
//! Bjorn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use glam::{DMat3, DVec3};

/// Builds a matrix from row-major coefficients.
const fn rows(m: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(m[0][0], m[1][0], m[2][0]),
        DVec3::new(m[0][1], m[1][1], m[2][1]),
        DVec3::new(m[0][2], m[1][2], m[2][2]),
    )
}

/// Linear sRGB to LMS cone response.
const LINEAR_TO_LMS: DMat3 = rows([
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
]);

/// Non-linear LMS to OKLab.
const LMS_TO_OKLAB: DMat3 = rows([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

/// OKLab to non-linear LMS.
const OKLAB_TO_LMS: DMat3 = rows([
    [1.0, 0.3963377774, 0.2158037573],
    [1.0, -0.1055613458, -0.0638541728],
    [1.0, -0.0894841775, -1.2914855480],
]);

/// LMS cone response to linear sRGB.
const LMS_TO_LINEAR: DMat3 = rows([
    [4.0767416621, -3.3077115913, 0.2309699292],
    [-1.2684380046, 2.6097574011, -0.3413193965],
    [-0.0041960863, -0.7034186147, 1.7076147010],
]);

/// A color in OKLab.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white) for in-gamut colors
/// - `a`: green/red opponent axis
/// - `b`: blue/yellow opponent axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

impl Oklab {
    /// Creates an OKLab color from components.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Converts linear RGB to OKLab.
    ///
    /// `cbrt` is odd-symmetric, so slightly negative LMS responses from
    /// out-of-gamut input stay finite.
    pub fn from_linear(rgb: [f64; 3]) -> Self {
        let lms = LINEAR_TO_LMS * DVec3::from_array(rgb);
        let lms = DVec3::new(lms.x.cbrt(), lms.y.cbrt(), lms.z.cbrt());
        let lab = LMS_TO_OKLAB * lms;
        Self::new(lab.x, lab.y, lab.z)
    }

    /// Converts OKLab back to linear RGB. The result is not clamped.
    pub fn to_linear(self) -> [f64; 3] {
        let lms = OKLAB_TO_LMS * DVec3::new(self.l, self.a, self.b);
        let lms = lms * lms * lms;
        (LMS_TO_LINEAR * lms).to_array()
    }
}

/// OKLch: polar form of OKLab (lightness, chroma, hue).
///
/// Hue is in radians, `atan2(b, a)`. For achromatic colors `atan2(0, 0)`
/// yields 0, which is harmless since chroma is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness (same as OKLab L).
    pub l: f64,
    /// Chroma: distance from the neutral axis.
    pub c: f64,
    /// Hue angle in radians.
    pub h: f64,
}

impl Oklch {
    /// Creates an OKLch color from components.
    #[inline]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Converts linear RGB straight to OKLch.
    #[inline]
    pub fn from_linear(rgb: [f64; 3]) -> Self {
        Oklab::from_linear(rgb).into()
    }

    /// Converts OKLch straight to linear RGB. The result is not clamped.
    #[inline]
    pub fn to_linear(self) -> [f64; 3] {
        Oklab::from(self).to_linear()
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        Self::new(lab.l, lab.a.hypot(lab.b), lab.b.atan2(lab.a))
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        let (sin, cos) = lch.h.sin_cos();
        Self::new(lch.l, lch.c * cos, lch.c * sin)
    }
}
