//! I/O error types
//!
//! Two classes of failure leave this crate:
//!
//! - [`FormatError`]: the bytes are not an acceptable 24-bit bitmap
//! - [`IoError`]: the file could not be opened, read or written, or it
//!   failed format validation (wrapping a [`FormatError`] with the path)

use std::path::PathBuf;
use thiserror::Error;

/// A structural or content violation of the bitmap format contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The first two bytes are not `BM`
    #[error("not a BMP file (bad signature {0:02x?})")]
    BadSignature([u8; 2]),

    /// Input ended inside a header block
    #[error("truncated {block}: need {needed} bytes, got {available}")]
    TruncatedHeader {
        /// Name of the block being read
        block: &'static str,
        /// Bytes required to finish the block
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// Bit depth other than 24
    #[error("unsupported bits per pixel: {0} (only 24 is supported)")]
    UnsupportedBitsPerPixel(u16),

    /// Compression code other than 0
    #[error("compressed bitmaps are not supported (compression {0})")]
    Compressed(u32),

    /// Non-positive width or zero height
    #[error("invalid dimensions: width {width}, height {height}")]
    InvalidDimensions {
        /// Declared width
        width: i64,
        /// Declared height
        height: i64,
    },

    /// Pixel-data offset points past the end of the input
    #[error("pixel data offset {offset} is beyond end of data ({len} bytes)")]
    OffsetOutOfRange {
        /// Declared offset
        offset: usize,
        /// Input length
        len: usize,
    },

    /// Input ended inside the pixel array
    #[error("truncated pixel data in row {row} of {height}")]
    TruncatedPixelData {
        /// First incomplete row in file order
        row: usize,
        /// Total rows declared
        height: usize,
    },

    /// Dimensions do not fit the header's integer fields
    #[error("dimensions {width}x{height} overflow the bitmap header")]
    DimensionOverflow {
        /// Raster width
        width: usize,
        /// Raster height
        height: usize,
    },
}

/// Error type for bitmap I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The input path could not be opened for reading
    #[error("can not open {} for reading: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output path could not be opened for writing
    #[error("can not open {} for writing: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on an already open stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bitmap data from a stream failed validation
    #[error("invalid bitmap: {0}")]
    Format(#[from] FormatError),

    /// Bitmap file failed validation
    #[error("{}: {source}", .path.display())]
    FormatInFile {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl IoError {
    /// True for format violations, false for operating-system I/O failures.
    pub fn is_format(&self) -> bool {
        matches!(self, IoError::Format(_) | IoError::FormatInFile { .. })
    }

    /// The underlying format violation, if any.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            IoError::Format(e) | IoError::FormatInFile { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
