//! Tiled 3D LUT indexing.
//!
//! A cube of side `squares` is stored as `squares` square slabs laid left to
//! right along the surface width:
//!
//! ```text
//!  width = squares * squares
//! +-------+-------+-----+-------+
//! | z = 0 | z = 1 | ... | z = N |  height = squares
//! +-------+-------+-----+-------+
//!   x ->    x ->          x ->
//! ```
//!
//! Within a slab the column is the red coordinate and the row is green.
//! The slab index is blue.

use crate::{LutError, LutResult};
use lutnorm_color::linear_from_srgb8;
use lutnorm_dds::DdsContainer;
use tracing::debug;

/// Order in which cube points are enumerated.
///
/// Blue is always the outermost axis, so index 0 is the black corner and
/// the last index the white corner under both orders. Enumeration and
/// [`LutCube::at`] share [`AxisOrder::flat_index`], which keeps them in step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOrder {
    /// Red varies fastest, then green, then blue.
    #[default]
    RedFastest,
    /// Green varies fastest, then red, then blue.
    GreenFastest,
}

/// Enumeration order used by [`LutCube::from_container`].
pub const DEFAULT_AXIS_ORDER: AxisOrder = AxisOrder::RedFastest;

impl AxisOrder {
    /// Position of grid point `[x, y, z]` in the enumeration.
    #[inline]
    pub fn flat_index(self, grid: [usize; 3], squares: usize) -> usize {
        let [x, y, z] = grid;
        match self {
            AxisOrder::RedFastest => (z * squares + y) * squares + x,
            AxisOrder::GreenFastest => (z * squares + x) * squares + y,
        }
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    #[inline]
    pub fn grid_at(self, index: usize, squares: usize) -> [usize; 3] {
        let fast = index % squares;
        let mid = (index / squares) % squares;
        let z = index / (squares * squares);
        match self {
            AxisOrder::RedFastest => [fast, mid, z],
            AxisOrder::GreenFastest => [mid, fast, z],
        }
    }
}

/// One cube entry.
///
/// `raw` and `linear` are snapshots taken at indexing time. Anything that
/// compares against the current texel value should call
/// [`read_linear`](Self::read_linear) on the live surface instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutPoint {
    /// Normalized input coordinate, each axis in [0, 1].
    pub coord: [f64; 3],
    /// Integer grid position, each axis in `0..squares`.
    pub grid: [usize; 3],
    /// Byte offset of the texel within the surface.
    pub offset: usize,
    /// Texel bytes (RGBA, zero padded for narrower texels).
    pub raw: [u8; 4],
    /// Decoded linear RGB of `raw`.
    pub linear: [f64; 3],
}

impl LutPoint {
    /// Decodes the texel's current value from the surface.
    #[inline]
    pub fn read_linear(&self, surface: &[u8]) -> [f64; 3] {
        linear_from_srgb8(&surface[self.offset..self.offset + 3])
    }

    /// Writes encoded RGB bytes into the texel, leaving alpha untouched.
    #[inline]
    pub fn write_rgb8(&self, surface: &mut [u8], rgb: [u8; 3]) {
        surface[self.offset..self.offset + 3].copy_from_slice(&rgb);
    }
}

/// A tiled 3D LUT indexed over a texel surface.
///
/// # Example
///
/// ```rust
/// use lutnorm_lut::{LutCube, AxisOrder, identity_rgba8};
///
/// let surface = identity_rgba8(17);
/// let cube = LutCube::from_surface(&surface, 17 * 17, 17, 4, AxisOrder::RedFastest).unwrap();
/// assert_eq!(cube.len(), 17 * 17 * 17);
/// assert_eq!(cube.black().linear, [0.0, 0.0, 0.0]);
/// assert_eq!(cube.white().linear, [1.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LutCube {
    squares: usize,
    width: usize,
    bytes_per_pixel: usize,
    order: AxisOrder,
    points: Vec<LutPoint>,
}

impl LutCube {
    /// Cube side for a `width x height` surface.
    ///
    /// # Errors
    ///
    /// [`LutError::UnsupportedLayout`] unless `width / height` is an integer
    /// `>= 2` whose slabs fit in the surface height.
    pub fn squares_for(width: usize, height: usize) -> LutResult<usize> {
        let unsupported = LutError::UnsupportedLayout { width, height };
        if height == 0 || width % height != 0 {
            return Err(unsupported);
        }
        let squares = width / height;
        if squares < 2 || squares > height {
            return Err(unsupported);
        }
        Ok(squares)
    }

    /// Indexes a parsed container with [`DEFAULT_AXIS_ORDER`].
    pub fn from_container(dds: &DdsContainer<'_>) -> LutResult<Self> {
        Self::with_order(dds, DEFAULT_AXIS_ORDER)
    }

    /// Indexes a parsed container with an explicit enumeration order.
    pub fn with_order(dds: &DdsContainer<'_>, order: AxisOrder) -> LutResult<Self> {
        Self::from_surface(
            dds.surface(),
            dds.width(),
            dds.height(),
            dds.bytes_per_pixel,
            order,
        )
    }

    /// Indexes a raw surface.
    ///
    /// # Errors
    ///
    /// - [`LutError::UnsupportedLayout`] if no cube fits the dimensions
    /// - [`LutError::TexelTooSmall`] if texels are narrower than 3 bytes
    pub fn from_surface(
        surface: &[u8],
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        order: AxisOrder,
    ) -> LutResult<Self> {
        let squares = Self::squares_for(width, height)?;
        if bytes_per_pixel < 3 {
            return Err(LutError::TexelTooSmall(bytes_per_pixel));
        }

        let mut cube = Self {
            squares,
            width,
            bytes_per_pixel,
            order,
            points: Vec::with_capacity(squares * squares * squares),
        };

        let max = (squares - 1) as f64;
        for index in 0..squares * squares * squares {
            let grid = order.grid_at(index, squares);
            let coord = grid.map(|g| g as f64 / max);
            let offset = cube.grid_offset(grid);

            let mut raw = [0u8; 4];
            let n = bytes_per_pixel.min(4);
            raw[..n].copy_from_slice(&surface[offset..offset + n]);

            cube.points.push(LutPoint {
                coord,
                grid,
                offset,
                raw,
                linear: linear_from_srgb8(&raw),
            });
        }

        debug!(squares, points = cube.points.len(), ?order, "indexed LUT cube");
        Ok(cube)
    }

    /// Cube side length.
    #[inline]
    pub fn squares(&self) -> usize {
        self.squares
    }

    /// Number of points (`squares^3`).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a successfully indexed cube.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in enumeration order.
    #[inline]
    pub fn points(&self) -> &[LutPoint] {
        &self.points
    }

    /// The (0, 0, 0) corner.
    #[inline]
    pub fn black(&self) -> &LutPoint {
        &self.points[0]
    }

    /// The (1, 1, 1) corner.
    #[inline]
    pub fn white(&self) -> &LutPoint {
        &self.points[self.points.len() - 1]
    }

    /// Rounds a normalized coordinate to the nearest grid index.
    #[inline]
    fn grid_index(&self, v: f64) -> usize {
        let max = (self.squares - 1) as f64;
        (v * max).round().clamp(0.0, max) as usize
    }

    /// Surface byte offset of a grid point.
    #[inline]
    pub fn grid_offset(&self, grid: [usize; 3]) -> usize {
        let [x, y, z] = grid;
        let row = y;
        let column = self.squares * z + x;
        (row * self.width + column) * self.bytes_per_pixel
    }

    /// Surface byte offset of the texel nearest a normalized coordinate.
    #[inline]
    pub fn texel_offset(&self, x: f64, y: f64, z: f64) -> usize {
        self.grid_offset([self.grid_index(x), self.grid_index(y), self.grid_index(z)])
    }

    /// Nearest grid point to a normalized coordinate.
    ///
    /// ```rust
    /// use lutnorm_lut::{LutCube, AxisOrder, identity_rgba8};
    ///
    /// let surface = identity_rgba8(5);
    /// let cube = LutCube::from_surface(&surface, 25, 5, 4, AxisOrder::RedFastest).unwrap();
    /// assert_eq!(cube.at(0.49, 0.0, 1.0).grid, [2, 0, 4]);
    /// ```
    pub fn at(&self, x: f64, y: f64, z: f64) -> &LutPoint {
        let grid = [self.grid_index(x), self.grid_index(y), self.grid_index(z)];
        &self.points[self.order.flat_index(grid, self.squares)]
    }
}

/// Builds an identity RGBA8 surface for a cube of side `squares`.
///
/// Each texel stores its own coordinate in encoded space, so the LUT maps
/// every color to itself.
pub fn identity_rgba8(squares: usize) -> Vec<u8> {
    let width = squares * squares;
    let max = (squares - 1) as f64;
    let mut surface = vec![0u8; width * squares * 4];
    for z in 0..squares {
        for y in 0..squares {
            for x in 0..squares {
                let offset = (y * width + squares * z + x) * 4;
                surface[offset..offset + 4].copy_from_slice(&[
                    lutnorm_color::channel_to_u8(x as f64 / max),
                    lutnorm_color::channel_to_u8(y as f64 / max),
                    lutnorm_color::channel_to_u8(z as f64 / max),
                    255,
                ]);
            }
        }
    }
    surface
}
