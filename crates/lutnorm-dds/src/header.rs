//! Header decoding on top of `ddsfile`.
//!
//! `ddsfile::Dds::read` copies the whole surface into its own `Vec`. Here
//! only the magic and the headers are decoded, from a cursor over the
//! caller's buffer, and the cursor position tells where texels begin:
//!
//! ```text
//! offset  size  field
//!      0     4  magic "DDS "
//!      4   124  main header (pixel format at 76, fourCC at 84)
//!    128    20  DX10 header (only when fourCC == "DX10")
//! ```

use crate::{DdsError, DdsResult};
use ddsfile::{DxgiFormat, FourCC, Header, Header10};
use std::io::Cursor;

/// File signature.
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// `DXGI_FORMAT_R8G8B8A8_UNORM`: four 8-bit unsigned normalized channels.
pub const DXGI_FORMAT_R8G8B8A8_UNORM: u32 = DxgiFormat::R8G8B8A8_UNorm as u32;

/// Decoded headers plus the byte length they occupy, magic included.
#[derive(Debug, Clone)]
pub struct Headers {
    /// Main header.
    pub header: Header,
    /// Extended header, if the fourCC announced one.
    pub header10: Option<Header10>,
    /// Offset of the first surface byte.
    pub len: usize,
}

/// True if the pixel format's fourCC announces a DX10 extended header.
#[inline]
pub fn has_dx10_header(header: &Header) -> bool {
    header.spf.fourcc == Some(FourCC(FourCC::DX10))
}

/// Parses the magic, the main header and the optional DX10 header.
///
/// # Errors
///
/// - [`DdsError::InvalidSignature`] if the buffer is not a DDS container
/// - [`DdsError::Format`] if a header is truncated or malformed, including
///   a DX10 block whose DXGI code `ddsfile` does not know
pub fn read_headers(data: &[u8]) -> DdsResult<Headers> {
    let mut magic = [0u8; 4];
    let n = data.len().min(magic.len());
    magic[..n].copy_from_slice(&data[..n]);
    if magic != DDS_MAGIC {
        return Err(DdsError::InvalidSignature(magic));
    }

    let mut cursor = Cursor::new(&data[DDS_MAGIC.len()..]);
    let header = Header::read(&mut cursor)?;
    let header10 = if has_dx10_header(&header) {
        Some(Header10::read(&mut cursor)?)
    } else {
        None
    };

    Ok(Headers {
        header,
        header10,
        len: DDS_MAGIC.len() + cursor.position() as usize,
    })
}
