//! # lutnorm-lut
//!
//! Tiled 3D lookup tables stored in texture surfaces.
//!
//! Game engines commonly bake a color grade into a 2D texture holding a
//! cube of side `N` as `N` square slabs side by side (`N*N x N` pixels).
//! This crate indexes such a surface as a cube and measures its levels.
//!
//! # Types
//!
//! - [`LutCube`] - points of the cube, nearest-point lookup, corners
//! - [`LutPoint`] - coordinate, texel offset and decoded color of one entry
//! - [`AxisOrder`] - enumeration order of the points
//! - [`LevelStats`] - black/white level, luma and tint statistics
//!
//! # Usage
//!
//! ```rust
//! use lutnorm_lut::{LutCube, LevelStats, AxisOrder, identity_rgba8};
//!
//! let surface = identity_rgba8(17);
//! let cube = LutCube::from_surface(&surface, 289, 17, 4, AxisOrder::RedFastest)?;
//! let stats = LevelStats::of_cube(&cube);
//! assert!(stats.spans_full_range());
//! # Ok::<(), lutnorm_lut::LutError>(())
//! ```
//!
//! # Used By
//!
//! - `lutnorm-ops` - the tone correction pass

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cube;
mod error;
mod levels;

pub use cube::{AxisOrder, DEFAULT_AXIS_ORDER, LutCube, LutPoint, identity_rgba8};
pub use error::{LutError, LutResult};
pub use levels::{LevelStats, neutral_tint};
