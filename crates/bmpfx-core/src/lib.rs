//! bmpfx-core - Basic data structures for raster processing
//!
//! - [`Pixel`] - one 24-bit RGB sample
//! - [`Raster`] - an owned, row-major, top-down grid of pixels
//!
//! Rows are always stored top-down: row 0 is the visually topmost row,
//! whatever order the source file used.

pub mod error;
pub mod pixel;
pub mod raster;

pub use error::{Error, Result};
pub use pixel::Pixel;
pub use raster::{Raster, Rows};
