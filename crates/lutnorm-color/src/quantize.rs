//! Conversion between unit-range channels and 8-bit storage.

/// Rounds and clamps a [0, 1] channel to [0, 255].
///
/// Values outside the unit range saturate; NaN maps to 0.
///
/// ```rust
/// use lutnorm_color::quantize::channel_to_u8;
///
/// assert_eq!(channel_to_u8(0.5), 128);
/// assert_eq!(channel_to_u8(-0.2), 0);
/// assert_eq!(channel_to_u8(1.7), 255);
/// ```
#[inline]
pub fn channel_to_u8(channel: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Maps an 8-bit channel to [0, 1].
#[inline]
pub fn u8_to_channel(byte: u8) -> f64 {
    byte as f64 / 255.0
}
