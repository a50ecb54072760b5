//! bmpfx-filter - Image filters and the filter pipeline
//!
//! This crate provides the filters applied to a [`bmpfx_core::Raster`]:
//!
//! - Crop to a top-left rectangle
//! - Grayscale and negative
//! - Sharpening and edge detection with 3x3 kernels
//! - Gaussian blur with a kernel sized from sigma
//! - Random tile shuffle
//!
//! and a [`Pipeline`] that validates a list of named filters up front and
//! applies them in order.

pub mod color;
pub mod convolve;
pub mod edge;
mod error;
pub mod filter;
pub mod kernel;
pub mod pipeline;
pub mod shuffle;

pub use error::{FilterError, FilterResult};
pub use filter::{Filter, FilterKind};
pub use kernel::Kernel;
pub use pipeline::{FilterSpec, Pipeline, PipelineConfig, SEED_ENV_VAR, resolve};

// Re-export commonly used functions
pub use color::{LUMA_WEIGHTS, grayscale, luminance, negative};
pub use convolve::{convolve, gaussian_blur, sample_neighborhood};
pub use edge::{edge_detect, sharpen};
pub use shuffle::{crop, shuffle_tiles};
