//! Parsed container with a mutable view over the caller's buffer.
//!
//! [`DdsContainer`] never copies texel data. The buffer is split into the
//! header bytes, the top-level surface (`width * height * bytes_per_pixel`)
//! and any trailing bytes (extra mips, array slices), which are kept but
//! not interpreted. Writes through [`DdsContainer::surface_mut`] land in the
//! caller's buffer.

use crate::DdsResult;
use crate::header::read_headers;
use ddsfile::{Header, Header10};
use tracing::debug;

/// A DDS container borrowed from a byte buffer.
#[derive(Debug)]
pub struct DdsContainer<'a> {
    /// Main header.
    pub header: Header,
    /// Extended DX10 header, when the fourCC announced one.
    pub header10: Option<Header10>,
    /// Derived: leftover bytes divided by `width * height`, rounded down.
    ///
    /// Zero for block-compressed formats under one byte per pixel and for
    /// zero-sized surfaces. The surface is then empty and every body byte
    /// is trailing.
    pub bytes_per_pixel: usize,
    header_len: usize,
    surface: &'a mut [u8],
    trailing: &'a mut [u8],
}

impl<'a> DdsContainer<'a> {
    /// Parses a container in place.
    ///
    /// Only the headers are validated. Whether the body is a usable
    /// surface is left to the consumer, which knows which formats it reads.
    ///
    /// # Errors
    ///
    /// - [`DdsError::InvalidSignature`](crate::DdsError::InvalidSignature)
    ///   if the magic is missing
    /// - [`DdsError::Format`](crate::DdsError::Format) for truncated or
    ///   malformed headers
    ///
    /// # Example
    ///
    /// ```rust
    /// use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
    /// use lutnorm_dds::DdsContainer;
    ///
    /// let texture = Dds::new_dxgi(NewDxgiParams {
    ///     height: 2,
    ///     width: 4,
    ///     depth: None,
    ///     format: DxgiFormat::R8G8B8A8_UNorm,
    ///     mipmap_levels: None,
    ///     array_layers: None,
    ///     caps2: None,
    ///     is_cubemap: false,
    ///     resource_dimension: D3D10ResourceDimension::Texture2D,
    ///     alpha_mode: AlphaMode::Straight,
    /// })?;
    /// let mut buf = Vec::new();
    /// texture.write(&mut buf)?;
    ///
    /// let mut dds = DdsContainer::parse(&mut buf)?;
    /// assert_eq!(dds.bytes_per_pixel, 4);
    /// dds.surface_mut()[0] = 255;
    /// drop(dds);
    /// assert_eq!(buf[148], 255);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(data: &'a mut [u8]) -> DdsResult<Self> {
        let headers = read_headers(data)?;
        let header = headers.header;

        let pixels = header.width as usize * header.height as usize;
        let (_, body) = data.split_at_mut(headers.len);
        let bytes_per_pixel = body.len().checked_div(pixels).unwrap_or(0);
        let (surface, trailing) = body.split_at_mut(pixels * bytes_per_pixel);

        debug!(
            width = header.width,
            height = header.height,
            four_cc = ?header.spf.fourcc,
            dxgi_format = ?headers.header10.as_ref().map(|h| h.dxgi_format),
            bytes_per_pixel,
            trailing = trailing.len(),
            "parsed DDS container"
        );

        Ok(Self {
            header,
            header10: headers.header10,
            bytes_per_pixel,
            header_len: headers.len,
            surface,
            trailing,
        })
    }

    /// Surface width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    /// Surface height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    /// DXGI format code from the extended header, if present.
    #[inline]
    pub fn dxgi_format(&self) -> Option<u32> {
        self.header10.as_ref().map(|h| h.dxgi_format as u32)
    }

    /// Byte length of magic plus headers.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Top-level texel surface.
    #[inline]
    pub fn surface(&self) -> &[u8] {
        &self.surface[..]
    }

    /// Mutable top-level texel surface, aliasing the parsed buffer.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut [u8] {
        &mut self.surface[..]
    }

    /// Bytes after the top-level surface, preserved untouched.
    #[inline]
    pub fn trailing(&self) -> &[u8] {
        &self.trailing[..]
    }
}
