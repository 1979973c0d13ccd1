//! Conversions between 8-bit texel encoding and linear light.
//!
//! LUT texels hold sRGB-encoded channels. Level measurement and the tone
//! pass both work on linear values, so every texel is decoded once on read
//! and re-encoded once on write. Values outside [0, 1] go through the same
//! formulas unchanged; clamping happens at quantization.
//!
//! Curve definition: IEC 61966-2-1.

/// Encoded value where decoding leaves the straight segment.
pub const DECODE_THRESHOLD: f64 = 0.04045;

/// Linear value where encoding leaves the straight segment.
pub const ENCODE_THRESHOLD: f64 = 0.0031308;

/// Encoded channel to linear light.
///
/// ```text
/// V <= 0.04045   L = V / 12.92
/// otherwise      L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// ```rust
/// use lutnorm_color::srgb::eotf;
///
/// // 8-bit mid gray is a little over a fifth of linear white
/// assert!((eotf(128.0 / 255.0) - 0.2158).abs() < 1e-4);
/// ```
#[inline]
pub fn eotf(v: f64) -> f64 {
    if v <= DECODE_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light to encoded channel. Inverse of [`eotf`].
///
/// ```text
/// L <= 0.0031308   V = 12.92 * L
/// otherwise        V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn oetf(l: f64) -> f64 {
    if l <= ENCODE_THRESHOLD {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// [`eotf`] per channel.
#[inline]
pub fn eotf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(eotf)
}

/// [`oetf`] per channel.
#[inline]
pub fn oetf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(oetf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_survives_decode_encode() {
        for byte in 0..=255u32 {
            let v = byte as f64 / 255.0;
            let back = (oetf(eotf(v)) * 255.0).round() as u32;
            assert_eq!(back, byte);
        }
    }

    #[test]
    fn test_black_and_white_are_fixed() {
        assert_eq!(eotf(0.0), 0.0);
        assert_eq!(eotf(1.0), 1.0);
        assert_eq!(oetf(0.0), 0.0);
        assert!((oetf(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_straight_segment_near_black() {
        // bytes 0..=10 all decode through the 1/12.92 slope
        assert!(10.0 / 255.0 <= DECODE_THRESHOLD);
        assert_eq!(eotf(10.0 / 255.0), 10.0 / 255.0 / 12.92);
        assert!((oetf(0.001) - 0.01292).abs() < 1e-12);
    }

    #[test]
    fn test_segments_meet() {
        let below = eotf(DECODE_THRESHOLD);
        let above = eotf(DECODE_THRESHOLD + 1e-9);
        assert!((above - below).abs() < 1e-6);
        assert!((oetf(ENCODE_THRESHOLD) - DECODE_THRESHOLD).abs() < 1e-4);
    }

    #[test]
    fn test_rgb_is_per_channel() {
        let rgb = [0.0, 0.5, 1.0];
        assert_eq!(eotf_rgb(rgb), [eotf(0.0), eotf(0.5), eotf(1.0)]);
        assert_eq!(oetf_rgb(eotf_rgb(rgb)).map(|c| (c * 1e9).round()), [0.0, 0.5e9, 1e9]);
    }
}
