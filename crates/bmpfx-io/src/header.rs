//! Bitmap header blocks
//!
//! Wire layout (little-endian):
//!
//! | bytes    | block        | fields                                        |
//! |----------|--------------|-----------------------------------------------|
//! | 0..2     | magic        | `"BM"`                                        |
//! | 2..14    | file header  | file size, reserved1, reserved2, data offset  |
//! | 14..54   | info header  | BITMAPINFOHEADER                              |
//!
//! Only the fields that matter for a 24-bit uncompressed image are
//! validated; the rest are carried through untouched.

use crate::error::FormatError;

/// Bitmap signature
pub const MAGIC: [u8; 2] = *b"BM";
/// Size of the signature
pub const MAGIC_SIZE: usize = 2;
/// Size of the file header that follows the signature
pub const FILE_HEADER_SIZE: usize = 12;
/// Size of the BITMAPINFOHEADER block
pub const INFO_HEADER_SIZE: usize = 40;
/// Offset of pixel data in files this crate writes (no palette)
pub const PIXEL_DATA_OFFSET: usize = MAGIC_SIZE + FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// The only supported bit depth
pub const BITS_PER_PIXEL: u16 = 24;
/// Compression code for uncompressed RGB
pub const COMPRESSION_NONE: u32 = 0;

/// The 12-byte block after the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileHeader {
    /// Declared total file size
    pub file_size: u32,
    /// Reserved word 1
    pub reserved1: u16,
    /// Reserved word 2
    pub reserved2: u16,
    /// Byte offset of the pixel array from the start of the file
    pub offset: u32,
}

impl FileHeader {
    /// Parse from the 12 bytes following the signature.
    pub fn parse(bytes: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            file_size: le_u32(bytes, 0),
            reserved1: le_u16(bytes, 4),
            reserved2: le_u16(bytes, 6),
            offset: le_u32(bytes, 8),
        }
    }

    /// Serialize to wire order.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.file_size.to_le_bytes());
        out[4..6].copy_from_slice(&self.reserved1.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved2.to_le_bytes());
        out[8..12].copy_from_slice(&self.offset.to_le_bytes());
        out
    }
}

/// The 40-byte BITMAPINFOHEADER block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    /// Width in pixels; must be positive
    pub width: i32,
    /// Height in pixels; negative means rows are stored top-down
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub h_res: i32,
    pub v_res: i32,
    pub num_colors: u32,
    pub num_important_colors: u32,
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            image_size: 0,
            h_res: 0,
            v_res: 0,
            num_colors: 0,
            num_important_colors: 0,
        }
    }
}

impl InfoHeader {
    /// Parse from the 40 info-header bytes.
    pub fn parse(bytes: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: le_u32(bytes, 0),
            width: le_u32(bytes, 4) as i32,
            height: le_u32(bytes, 8) as i32,
            planes: le_u16(bytes, 12),
            bits_per_pixel: le_u16(bytes, 14),
            compression: le_u32(bytes, 16),
            image_size: le_u32(bytes, 20),
            h_res: le_u32(bytes, 24) as i32,
            v_res: le_u32(bytes, 28) as i32,
            num_colors: le_u32(bytes, 32),
            num_important_colors: le_u32(bytes, 36),
        }
    }

    /// Serialize to wire order.
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.h_res.to_le_bytes());
        out[28..32].copy_from_slice(&self.v_res.to_le_bytes());
        out[32..36].copy_from_slice(&self.num_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.num_important_colors.to_le_bytes());
        out
    }

    /// Check the constraints a decodable image must satisfy.
    ///
    /// Checked in order: bit depth, compression, dimensions.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(FormatError::UnsupportedBitsPerPixel(self.bits_per_pixel));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(FormatError::Compressed(self.compression));
        }
        if self.width <= 0 || self.height == 0 {
            return Err(FormatError::InvalidDimensions {
                width: self.width.into(),
                height: self.height.into(),
            });
        }
        Ok(())
    }

    /// True if rows are stored top-down (negative height).
    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }
}

/// Both header blocks of a bitmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

/// Read and validate the headers of a bitmap without decoding pixels.
///
/// Fails on a bad signature, a truncated header block, or an info block
/// that violates [`InfoHeader::validate`].
pub fn read_bmp_header(data: &[u8]) -> Result<BitmapHeader, FormatError> {
    let magic: [u8; MAGIC_SIZE] = take(data, 0, "signature")?;
    if magic != MAGIC {
        return Err(FormatError::BadSignature(magic));
    }

    let file = FileHeader::parse(&take(data, MAGIC_SIZE, "file header")?);
    let info = InfoHeader::parse(&take(data, MAGIC_SIZE + FILE_HEADER_SIZE, "info header")?);
    info.validate()?;

    Ok(BitmapHeader { file, info })
}

fn take<const N: usize>(
    data: &[u8],
    at: usize,
    block: &'static str,
) -> Result<[u8; N], FormatError> {
    let available = data.len().saturating_sub(at);
    data.get(at..at + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(FormatError::TruncatedHeader {
            block,
            needed: N,
            available,
        })
}

#[inline]
fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(info: &InfoHeader) -> Vec<u8> {
        let file = FileHeader {
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            offset: PIXEL_DATA_OFFSET as u32,
        };
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&file.to_bytes());
        data.extend_from_slice(&info.to_bytes());
        data
    }

    fn valid_info() -> InfoHeader {
        InfoHeader {
            width: 4,
            height: -2,
            h_res: 2835,
            v_res: 2835,
            ..InfoHeader::default()
        }
    }

    #[test]
    fn test_info_header_wire_roundtrip() {
        let info = valid_info();
        assert_eq!(InfoHeader::parse(&info.to_bytes()), info);
        // width at offset 4, height at offset 8
        assert_eq!(&info.to_bytes()[4..8], &[4, 0, 0, 0]);
        assert_eq!(&info.to_bytes()[8..12], &[0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_read_header() {
        let header = read_bmp_header(&header_bytes(&valid_info())).unwrap();
        assert_eq!(header.file.offset, 54);
        assert_eq!(header.info.width, 4);
        assert!(header.info.is_top_down());
    }

    #[test]
    fn test_bad_signature() {
        let mut data = header_bytes(&valid_info());
        data[0] = b'P';
        assert_eq!(
            read_bmp_header(&data),
            Err(FormatError::BadSignature([b'P', b'M']))
        );
    }

    #[test]
    fn test_truncated_info_header() {
        let data = header_bytes(&valid_info());
        let err = read_bmp_header(&data[..30]).unwrap_err();
        assert_eq!(
            err,
            FormatError::TruncatedHeader {
                block: "info header",
                needed: 40,
                available: 16
            }
        );
    }

    #[test]
    fn test_validation_order() {
        let info = InfoHeader {
            bits_per_pixel: 8,
            compression: 1,
            ..valid_info()
        };
        assert_eq!(info.validate(), Err(FormatError::UnsupportedBitsPerPixel(8)));

        let info = InfoHeader {
            compression: 1,
            ..valid_info()
        };
        assert_eq!(info.validate(), Err(FormatError::Compressed(1)));

        let info = InfoHeader {
            width: 0,
            ..valid_info()
        };
        assert!(matches!(
            info.validate(),
            Err(FormatError::InvalidDimensions { width: 0, .. })
        ));

        let info = InfoHeader {
            height: 0,
            ..valid_info()
        };
        assert!(matches!(
            info.validate(),
            Err(FormatError::InvalidDimensions { height: 0, .. })
        ));
    }
}
