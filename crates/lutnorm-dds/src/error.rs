//! Error types for container parsing.

use thiserror::Error;

/// Container parsing error.
#[derive(Debug, Error)]
pub enum DdsError {
    /// The buffer does not start with the `DDS ` magic.
    #[error("not a DDS container: signature {0:?}")]
    InvalidSignature([u8; 4]),

    /// Truncated or malformed main or DX10 header.
    #[error("DDS header error: {0}")]
    Format(#[from] ddsfile::Error),
}

/// Result type for container operations.
pub type DdsResult<T> = Result<T, DdsError>;
