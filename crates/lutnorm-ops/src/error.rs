//! Error types for the correction entry points.

use lutnorm_dds::DdsError;
use lutnorm_lut::LutError;
use thiserror::Error;

/// Error type for correction operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// The buffer is not a readable container.
    #[error(transparent)]
    Container(#[from] DdsError),

    /// The surface cannot be indexed as a cube.
    #[error(transparent)]
    Layout(#[from] LutError),
}

/// Result type for correction operations.
pub type OpsResult<T> = Result<T, OpsError>;
