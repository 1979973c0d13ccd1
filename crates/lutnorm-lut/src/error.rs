//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while indexing a LUT.
#[derive(Debug, Error)]
pub enum LutError {
    /// The surface is not a row of square slabs of side `width / height`.
    #[error("unsupported layout: {width}x{height} is not a tiled cube")]
    UnsupportedLayout {
        /// Surface width in pixels.
        width: usize,
        /// Surface height in pixels.
        height: usize,
    },

    /// Texels are too narrow to carry three color channels.
    #[error("texel of {0} bytes cannot hold RGB")]
    TexelTooSmall(usize),
}
