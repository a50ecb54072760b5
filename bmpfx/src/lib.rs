//! bmpfx - Filters for 24-bit BMP images
//!
//! Decodes uncompressed 24-bit bitmaps, runs them through a pipeline of
//! named filters and encodes the result.
//!
//! # Example
//!
//! ```
//! use bmpfx::filter::{FilterSpec, Pipeline, PipelineConfig};
//! use bmpfx::{Pixel, Raster};
//!
//! let mut raster = Raster::filled(4, 4, Pixel::new(10, 20, 30));
//! let specs = [FilterSpec::new("neg", Vec::<String>::new())];
//! Pipeline::build(&specs, PipelineConfig::default())
//!     .unwrap()
//!     .run(&mut raster)
//!     .unwrap();
//! assert_eq!(raster.pixel(0, 0), Pixel::new(245, 235, 225));
//! ```

pub mod cli;
pub mod logger;

// Re-export core types (primary data structures used everywhere)
pub use bmpfx_core::{Pixel, Raster, Rows};

// Re-export domain crates as modules to avoid name conflicts
pub use bmpfx_filter as filter;
pub use bmpfx_io as io;

use bmpfx_filter::{FilterError, FilterSpec, Pipeline, PipelineConfig};
use bmpfx_io::{IoError, read_bmp_file, write_bmp_file};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Any failure of a whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown filter name or bad filter parameters
    #[error(transparent)]
    Parameter(#[from] FilterError),

    /// File could not be read or written, or is not an acceptable bitmap
    #[error(transparent)]
    Io(#[from] IoError),

    /// Malformed command line
    #[error("{0}")]
    Usage(String),
}

/// Decode `input`, apply `specs` in order and encode the result to `output`.
///
/// The pipeline is validated in full before any filter runs, and the output
/// file is only created once every filter has succeeded.
pub fn process_file<P, Q>(
    input: P,
    output: Q,
    specs: &[FilterSpec],
    config: PipelineConfig,
) -> Result<(), Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());

    let mut bitmap = read_bmp_file(input)?;
    let pipeline = Pipeline::build(specs, config)?;
    pipeline.run(bitmap.raster_mut())?;
    write_bmp_file(&bitmap, output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        filters = pipeline.len(),
        width = bitmap.raster.width(),
        height = bitmap.raster.height(),
        "processed image"
    );
    Ok(())
}
