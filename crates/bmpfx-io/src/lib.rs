//! bmpfx-io - Bitmap file I/O
//!
//! Decodes and encodes uncompressed 24-bit Windows bitmaps into and out of
//! [`bmpfx_core::Raster`].
//!
//! # Example
//!
//! ```
//! use bmpfx_core::{Pixel, Raster};
//! use bmpfx_io::{Bitmap, decode, encode};
//!
//! let raster = Raster::filled(3, 2, Pixel::new(10, 20, 30));
//! let bytes = encode(&Bitmap::from_raster(raster.clone())).unwrap();
//! assert_eq!(decode(&bytes).unwrap().raster, raster);
//! ```

pub mod bmp;
mod error;
pub mod header;

pub use bmp::{
    Bitmap, declared_file_size, decode, encode, read_bmp, read_bmp_file, row_padding,
    write_bmp, write_bmp_file,
};
pub use error::{FormatError, IoError, IoResult};
pub use header::{BitmapHeader, FileHeader, InfoHeader, read_bmp_header};
