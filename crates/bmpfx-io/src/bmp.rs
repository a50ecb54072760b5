//! 24-bit BMP codec
//!
//! Reads and writes uncompressed 24-bit Windows bitmaps.
//!
//! Pixel rows are stored as blue-green-red triples followed by
//! [`row_padding`] zero bytes. Rows are bottom-up on the wire unless the
//! declared height is negative. The decoded [`Raster`] is always top-down,
//! and the encoder always writes bottom-up with a positive height.

use crate::error::{FormatError, IoError, IoResult};
use crate::header::{FileHeader, InfoHeader, MAGIC, PIXEL_DATA_OFFSET, read_bmp_header};
use bmpfx_core::{Pixel, Raster};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Bytes per pixel on the wire
const BYTES_PER_PIXEL: usize = 3;

/// A decoded bitmap: the raster plus the header fields carried through
/// re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Reserved words of the file header
    pub reserved: (u16, u16),
    /// Info block as decoded. Width and height are rewritten from the
    /// raster on encode; a negative height is normalised to positive on
    /// decode.
    pub info: InfoHeader,
    /// Pixel grid, top-down
    pub raster: Raster,
}

impl Bitmap {
    /// Wrap a freshly constructed raster with default header values.
    pub fn from_raster(raster: Raster) -> Self {
        Self {
            reserved: (0, 0),
            info: InfoHeader::default(),
            raster,
        }
    }

    /// Borrow the raster.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Mutably borrow the raster.
    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }

    /// Take the raster, dropping header state.
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

/// Padding bytes after each row of `width` pixels.
///
/// Rows are padded to a multiple of four bytes. With three bytes per pixel
/// the pad length reduces to `width mod 4`.
#[inline]
pub fn row_padding(width: usize) -> usize {
    width % 4
}

/// File size recorded in the header of an encoded `width` x `height` image.
///
/// The value is `offset + (height * 3 + width mod 4) * height`, saturated
/// to `u32`.
pub fn declared_file_size(width: usize, height: usize) -> u32 {
    let body = (height as u64)
        .saturating_mul(BYTES_PER_PIXEL as u64)
        .saturating_add(row_padding(width) as u64)
        .saturating_mul(height as u64);
    let total = (PIXEL_DATA_OFFSET as u64).saturating_add(body);
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Decode a bitmap from bytes.
///
/// # Errors
///
/// Any violation of the format contract yields a [`FormatError`] naming
/// the constraint: bad signature, truncated header, unsupported depth or
/// compression, invalid dimensions, out-of-range pixel offset, or
/// truncated pixel data.
pub fn decode(data: &[u8]) -> Result<Bitmap, FormatError> {
    let header = read_bmp_header(data)?;
    let mut info = header.info;

    let top_down = info.is_top_down();
    let width = info.width as usize;
    let height = info.height.unsigned_abs() as usize;
    let offset = header.file.offset as usize;

    if offset > data.len() {
        return Err(FormatError::OffsetOutOfRange {
            offset,
            len: data.len(),
        });
    }

    let row_bytes = width
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(FormatError::DimensionOverflow { width, height })?;
    let stride = row_bytes + row_padding(width);

    // The last row's padding may be missing.
    let available = data.len() - offset;
    let needed = stride
        .checked_mul(height - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(FormatError::DimensionOverflow { width, height })?;
    if available < needed {
        return Err(FormatError::TruncatedPixelData {
            row: available / stride,
            height,
        });
    }

    debug!(
        width,
        height, top_down, offset, stride, "decoding 24-bit bitmap"
    );

    let mut pixels = vec![Pixel::BLACK; width * height];
    for file_row in 0..height {
        let start = offset + file_row * stride;
        let src = &data[start..start + row_bytes];
        let y = if top_down {
            file_row
        } else {
            height - 1 - file_row
        };
        let dst = &mut pixels[y * width..(y + 1) * width];
        for (pixel, bgr) in dst.iter_mut().zip(src.chunks_exact(BYTES_PER_PIXEL)) {
            *pixel = Pixel::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    let raster = Raster::from_vec(width, height, pixels)
        .map_err(|_| FormatError::DimensionOverflow { width, height })?;
    info.height = info.height.checked_abs().unwrap_or(i32::MAX);

    Ok(Bitmap {
        reserved: (header.file.reserved1, header.file.reserved2),
        info,
        raster,
    })
}

/// Encode a bitmap to bytes.
///
/// The pixel-data offset is always [`PIXEL_DATA_OFFSET`] and rows are
/// written bottom-up. The info block is written as stored in `bitmap`,
/// with width and height taken from the raster.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDimensions`] for an empty raster and
/// [`FormatError::DimensionOverflow`] if a dimension exceeds `i32::MAX`.
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>, FormatError> {
    let raster = &bitmap.raster;
    let width = raster.width();
    let height = raster.height();

    if width == 0 || height == 0 {
        return Err(FormatError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    let overflow = || FormatError::DimensionOverflow { width, height };

    let info = InfoHeader {
        width: i32::try_from(width).map_err(|_| overflow())?,
        height: i32::try_from(height).map_err(|_| overflow())?,
        ..bitmap.info
    };
    let file = FileHeader {
        file_size: declared_file_size(width, height),
        reserved1: bitmap.reserved.0,
        reserved2: bitmap.reserved.1,
        offset: PIXEL_DATA_OFFSET as u32,
    };

    let padding = row_padding(width);
    let stride = width * BYTES_PER_PIXEL + padding;
    let mut out = Vec::with_capacity(PIXEL_DATA_OFFSET + stride * height);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&file.to_bytes());
    out.extend_from_slice(&info.to_bytes());
    debug_assert_eq!(out.len(), PIXEL_DATA_OFFSET);

    for row in raster.rows().rev() {
        for pixel in row {
            out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        out.resize(out.len() + padding, 0);
    }

    debug!(width, height, bytes = out.len(), "encoded 24-bit bitmap");
    Ok(out)
}

/// Read a bitmap from a stream.
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Bitmap> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data)?)
}

/// Write a bitmap to a stream.
pub fn write_bmp<W: Write>(bitmap: &Bitmap, mut writer: W) -> IoResult<()> {
    let data = encode(bitmap)?;
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}

/// Read a bitmap file.
///
/// Format violations are reported as [`IoError::FormatInFile`] naming
/// `path`.
pub fn read_bmp_file<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut data = Vec::new();
    BufReader::new(file).read_to_end(&mut data)?;

    decode(&data).map_err(|source| IoError::FormatInFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a bitmap file, creating or truncating it.
///
/// The image is encoded before the file is opened, so an unencodable
/// raster never leaves an empty file behind.
pub fn write_bmp_file<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let data = encode(bitmap).map_err(|source| IoError::FormatInFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file = File::create(path).map_err(|source| IoError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}
