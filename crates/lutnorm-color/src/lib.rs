//! # lutnorm-color
//!
//! Pure color math used by the LUT normalizer.
//!
//! Every function here is total over finite input, allocation free and
//! stateless. Values are `f64` so encode/decode round trips stay well under
//! `1e-9` and OKLab round trips under `1e-6`.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`srgb`] | sRGB transfer function (encoded <-> linear) |
//! | [`luma`] | Rec.709 relative luminance |
//! | [`oklab`] | OKLab and its polar form OKLch |
//! | [`quantize`] | Unit-range to 8-bit conversion |
//!
//! # Usage
//!
//! ```rust
//! use lutnorm_color::{srgb, luma, Oklch};
//!
//! let linear = srgb::eotf(0.5);
//! let y = luma::rec709([linear, linear, linear]);
//! assert!((y - linear).abs() < 1e-12);
//!
//! let lch = Oklch::from_linear([0.2, 0.4, 0.6]);
//! let back = lch.to_linear();
//! assert!((back[1] - 0.4).abs() < 1e-6);
//! ```
//!
//! # Used By
//!
//! - `lutnorm-lut` - decoding cube texels and level statistics
//! - `lutnorm-ops` - the tone correction pass

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod luma;
pub mod oklab;
pub mod quantize;
pub mod srgb;

pub use luma::{REC709_LUMA, rec709 as luma_rec709};
pub use oklab::{Oklab, Oklch};
pub use quantize::{channel_to_u8, u8_to_channel};
pub use srgb::eotf as srgb_eotf;

/// Decodes the first three 8-bit sRGB channels of a texel to linear RGB.
///
/// # Example
///
/// ```rust
/// use lutnorm_color::linear_from_srgb8;
///
/// assert_eq!(linear_from_srgb8(&[0, 0, 0, 255]), [0.0, 0.0, 0.0]);
/// assert_eq!(linear_from_srgb8(&[255, 255, 255, 255]), [1.0, 1.0, 1.0]);
/// ```
#[inline]
pub fn linear_from_srgb8(bytes: &[u8]) -> [f64; 3] {
    srgb::eotf_rgb([
        u8_to_channel(bytes[0]),
        u8_to_channel(bytes[1]),
        u8_to_channel(bytes[2]),
    ])
}

/// Encodes linear RGB to 8-bit sRGB, clamping out-of-range values.
#[inline]
pub fn srgb8_from_linear(rgb: [f64; 3]) -> [u8; 3] {
    srgb::oetf_rgb(rgb).map(channel_to_u8)
}
