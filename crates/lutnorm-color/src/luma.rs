//! Rec.709 relative luminance.

/// Rec.709 red luminance coefficient.
pub const REC709_LUMA_R: f64 = 0.2126;
/// Rec.709 green luminance coefficient.
pub const REC709_LUMA_G: f64 = 0.7152;
/// Rec.709 blue luminance coefficient.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luminance weights as `[r, g, b]`.
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Relative luminance (Y) of a linear RGB triplet.
///
/// ```rust
/// use lutnorm_color::luma::rec709;
///
/// assert_eq!(rec709([1.0, 1.0, 1.0]), 1.0);
/// assert_eq!(rec709([0.0, 0.0, 0.0]), 0.0);
/// ```
#[inline]
pub fn rec709(rgb: [f64; 3]) -> f64 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert_eq!(rec709([1.0, 1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_green_dominates() {
        assert!(rec709([0.0, 1.0, 0.0]) > rec709([1.0, 0.0, 0.0]));
        assert!(rec709([1.0, 0.0, 0.0]) > rec709([0.0, 0.0, 1.0]));
    }
}
