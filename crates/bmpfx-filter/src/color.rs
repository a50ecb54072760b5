//! Per-pixel color operations

use bmpfx_core::{Pixel, Raster, pixel::MAX_CHANNEL};

/// Luminance weights for red, green and blue (ITU-R BT.601)
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Luminance of a pixel in `[0, 255]`.
///
/// Computed on channels normalised to `[0, 1]` and rounded half away
/// from zero.
pub fn luminance(pixel: Pixel) -> u8 {
    let scale = MAX_CHANNEL as f64;
    let [r, g, b] = pixel.channels().map(|c| c as f64 / scale);
    let [wr, wg, wb] = LUMA_WEIGHTS;
    ((r * wr + g * wg + b * wb) * scale).round() as u8
}

/// Replace every pixel by its luminance on all three channels.
pub fn grayscale(raster: &mut Raster) {
    for pixel in raster.pixels_mut() {
        *pixel = Pixel::gray(luminance(*pixel));
    }
}

/// Replace every channel `c` by `255 - c`.
pub fn negative(raster: &mut Raster) {
    for pixel in raster.pixels_mut() {
        *pixel = pixel.inverted();
    }
}
