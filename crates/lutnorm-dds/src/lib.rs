//! # lutnorm-dds
//!
//! DirectDraw Surface (DDS) container parsing for LUT textures.
//!
//! Only the header is decoded. The texel surface stays in the caller's
//! buffer and is exposed as a mutable slice, so a correction pass can
//! rewrite texels in place and the caller persists the same buffer.
//!
//! Headers are decoded with [`ddsfile`]. Its `Dds::read` would copy the
//! surface, so this crate only reads the headers and keeps the body in place.
//!
//! # Example
//!
//! ```rust
//! use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
//! use lutnorm_dds::{DXGI_FORMAT_R8G8B8A8_UNORM, DdsContainer};
//!
//! let texture = Dds::new_dxgi(NewDxgiParams {
//!     height: 2,
//!     width: 4,
//!     depth: None,
//!     format: DxgiFormat::R8G8B8A8_UNorm,
//!     mipmap_levels: None,
//!     array_layers: None,
//!     caps2: None,
//!     is_cubemap: false,
//!     resource_dimension: D3D10ResourceDimension::Texture2D,
//!     alpha_mode: AlphaMode::Straight,
//! })?;
//! let mut buf = Vec::new();
//! texture.write(&mut buf)?;
//!
//! let dds = DdsContainer::parse(&mut buf)?;
//! assert_eq!(dds.dxgi_format(), Some(DXGI_FORMAT_R8G8B8A8_UNORM));
//! assert_eq!(dds.surface().len(), 32);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Used By
//!
//! - `lutnorm-lut` - cube indexing over the surface
//! - `lutnorm-ops` - the correction entry point

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod container;
mod error;
mod header;

pub use container::DdsContainer;
pub use error::{DdsError, DdsResult};
pub use header::DXGI_FORMAT_R8G8B8A8_UNORM;
