//! # lutnorm-ops
//!
//! Tone correction for tiled 3D LUT textures.
//!
//! A LUT that lifts black above zero or pulls white below one flattens
//! contrast. The pass here pulls the black corner to true black and the
//! white corner to true white while keeping each point's hue, working in
//! OKLch so lightness and chroma are adjusted independently.
//!
//! # Operations
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`patch`] / [`patch_in_place`] | parse, index, measure and correct a DDS buffer |
//! | [`correct`] | run the pass over an already parsed and indexed LUT |
//! | [`measure`] | level statistics and tint without correction |
//!
//! # Usage
//!
//! ```rust
//! use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
//! use lutnorm_lut::identity_rgba8;
//! use lutnorm_ops::{CorrectionContext, SkipReason, patch};
//!
//! let mut lut = Dds::new_dxgi(NewDxgiParams {
//!     height: 9,
//!     width: 81,
//!     depth: None,
//!     format: DxgiFormat::R8G8B8A8_UNorm,
//!     mipmap_levels: None,
//!     array_layers: None,
//!     caps2: None,
//!     is_cubemap: false,
//!     resource_dimension: D3D10ResourceDimension::Texture2D,
//!     alpha_mode: AlphaMode::Straight,
//! })?;
//! lut.data = identity_rgba8(9);
//! let mut buf = Vec::new();
//! lut.write(&mut buf)?;
//!
//! let patched = patch(&CorrectionContext::default(), buf)?;
//! assert_eq!(patched.report.changed, 0);
//! assert_eq!(patched.report.skipped, Some(SkipReason::AlreadyNeutral));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Used By
//!
//! - `lutnorm-cli` - batch correction of a LUT directory

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod context;
mod correct;
mod error;
mod patch;

pub use context::CorrectionContext;
pub use correct::{
    CorrectionReport, RangeOutcome, SkipReason, ToneCorrector, correct, linear_normalization,
    resolve_range,
};
pub use error::{OpsError, OpsResult};
pub use patch::{Measurement, Patched, measure, patch, patch_in_place};
