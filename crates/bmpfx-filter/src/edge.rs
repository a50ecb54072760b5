//! Sharpening and edge detection
//!
//! Both are 3x3 convolutions through [`sample_neighborhood`].

use crate::Kernel;
use crate::color::grayscale;
use crate::convolve::{convolve, sample_neighborhood};
use bmpfx_core::{Pixel, Raster};

/// Sharpen with the kernel `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
pub fn sharpen(raster: &Raster) -> Raster {
    convolve(raster, &Kernel::sharpen())
}

/// Binary edge map.
///
/// The raster is first converted to grayscale in place. Each pixel is then
/// convolved with `[[0,-1,0],[-1,4,-1],[0,-1,0]]`; the output is white where
/// the convolved red channel exceeds `threshold` and black elsewhere.
pub fn edge_detect(raster: &mut Raster, threshold: u8) -> Raster {
    grayscale(raster);
    let kernel = Kernel::edge_detect();
    let gray = &*raster;
    Raster::from_fn(gray.width(), gray.height(), |x, y| {
        if sample_neighborhood(gray, x, y, &kernel).r > threshold {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    })
}
