//! Synthetic DDS LUT fixtures.
//!
//! Every container is built in memory, so no binary files are checked in.

use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
use lutnorm_color::{srgb8_from_linear, srgb_eotf};
use lutnorm_lut::identity_rgba8;
use std::io;
use std::path::{Path, PathBuf};

/// Size of the DDS magic, main header and DX10 header.
pub const HEADER_LEN: usize = 4 + 124 + 20;

/// A tiled RGBA8 LUT waiting to be wrapped in a DDS container.
#[derive(Debug, Clone)]
pub struct LutFixture {
    squares: usize,
    format: DxgiFormat,
    surface: Vec<u8>,
}

impl LutFixture {
    /// Identity LUT of side `squares`.
    pub fn identity(squares: usize) -> Self {
        Self {
            squares,
            format: DxgiFormat::R8G8B8A8_UNorm,
            surface: identity_rgba8(squares),
        }
    }

    /// LUT whose output is `lift + (gain - lift) * input` per channel, in
    /// linear light.
    pub fn graded(squares: usize, lift: [f64; 3], gain: [f64; 3]) -> Self {
        let mut fixture = Self::identity(squares);
        let max = (squares - 1) as f64;
        for z in 0..squares {
            for y in 0..squares {
                for x in 0..squares {
                    let grid = [x, y, z];
                    let rgb: [f64; 3] = std::array::from_fn(|c| {
                        let input = srgb_eotf(grid[c] as f64 / max);
                        lift[c] + (gain[c] - lift[c]) * input
                    });
                    fixture = fixture.with_texel(grid, srgb8_from_linear(rgb));
                }
            }
        }
        fixture
    }

    /// Sets the DXGI format written to the DX10 header.
    pub fn format(mut self, format: DxgiFormat) -> Self {
        self.format = format;
        self
    }

    /// Overwrites the RGB bytes of one grid point.
    pub fn with_texel(mut self, grid: [usize; 3], rgb: [u8; 3]) -> Self {
        let o = texel_offset(self.squares, grid);
        self.surface[o..o + 3].copy_from_slice(&rgb);
        self
    }

    /// Overwrites the black corner.
    pub fn black(self, rgb: [u8; 3]) -> Self {
        self.with_texel([0, 0, 0], rgb)
    }

    /// Overwrites the white corner.
    pub fn white(self, rgb: [u8; 3]) -> Self {
        let n = self.squares - 1;
        self.with_texel([n, n, n], rgb)
    }

    /// Cube side.
    pub fn squares(&self) -> usize {
        self.squares
    }

    /// Serializes the full DDS file.
    pub fn build(&self) -> io::Result<Vec<u8>> {
        let side = self.squares as u32;
        let mut dds = Dds::new_dxgi(NewDxgiParams {
            height: side,
            width: side * side,
            depth: None,
            format: self.format,
            mipmap_levels: None,
            array_layers: None,
            caps2: None,
            is_cubemap: false,
            resource_dimension: D3D10ResourceDimension::Texture2D,
            alpha_mode: AlphaMode::Straight,
        })
        .map_err(io::Error::other)?;
        dds.data = self.surface.clone();

        let mut buf = Vec::with_capacity(HEADER_LEN + self.surface.len());
        dds.write(&mut buf).map_err(io::Error::other)?;
        Ok(buf)
    }

    /// Writes the DDS file to `dir/name` and returns its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, self.build()?)?;
        Ok(path)
    }
}

/// Surface byte offset of a grid point in a tiled RGBA8 LUT.
pub fn texel_offset(squares: usize, [x, y, z]: [usize; 3]) -> usize {
    (y * squares * squares + squares * z + x) * 4
}

/// RGB bytes of a grid point in a DDS file built by [`LutFixture::build`].
pub fn rgb_at(file: &[u8], squares: usize, grid: [usize; 3]) -> [u8; 3] {
    let o = HEADER_LEN + texel_offset(squares, grid);
    [file[o], file[o + 1], file[o + 2]]
}
