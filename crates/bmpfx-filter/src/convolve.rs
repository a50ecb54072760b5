//! Convolution operations
//!
//! [`sample_neighborhood`] is the single neighborhood algorithm shared by
//! sharpening, edge detection and Gaussian blur; the three differ only in
//! the kernel they pass.
//!
//! # Border handling
//!
//! When a kernel tap falls outside the raster on one axis, that axis uses
//! the target pixel's own coordinate instead. Each axis is handled
//! independently, so a tap outside on both axes reads the target pixel
//! itself. For a 3x3 kernel this is the same as replicating the nearest
//! edge pixel; for larger kernels taps never wrap or read zeros.

use crate::{FilterResult, Kernel};
use bmpfx_core::{Pixel, Raster, pixel::MAX_CHANNEL};

const CHANNEL_SCALE: f64 = MAX_CHANNEL as f64;

/// Compute the convolved value of the pixel at column `x`, row `y`.
///
/// Channels are normalised to `[0, 1]`, weighted, summed, then scaled back,
/// rounded half away from zero and clamped to `[0, 255]`.
pub fn sample_neighborhood(raster: &Raster, x: usize, y: usize, kernel: &Kernel) -> Pixel {
    let radius = kernel.radius() as isize;
    let (w, h) = (raster.width() as isize, raster.height() as isize);
    let (cx, cy) = (x as isize, y as isize);
    let data = kernel.data();
    let size = kernel.size();

    let mut sum = [0.0f64; 3];
    for ky in 0..size {
        let sy = cy + ky as isize - radius;
        let sy = (if (0..h).contains(&sy) { sy } else { cy }) as usize;
        for kx in 0..size {
            let sx = cx + kx as isize - radius;
            let sx = (if (0..w).contains(&sx) { sx } else { cx }) as usize;

            let weight = data[ky * size + kx];
            let pixel = raster.pixel(sx, sy);
            for (acc, channel) in sum.iter_mut().zip(pixel.channels()) {
                *acc += channel as f64 / CHANNEL_SCALE * weight;
            }
        }
    }

    let [r, g, b] = sum.map(to_channel);
    Pixel::new(r, g, b)
}

/// Convolve every pixel of a raster with a kernel.
///
/// All taps read from the input; the result is a new raster of the same
/// size.
pub fn convolve(raster: &Raster, kernel: &Kernel) -> Raster {
    Raster::from_fn(raster.width(), raster.height(), |x, y| {
        sample_neighborhood(raster, x, y, kernel)
    })
}

/// Apply a Gaussian blur with the given sigma.
///
/// The kernel side is chosen by [`Kernel::gaussian_size`].
pub fn gaussian_blur(raster: &Raster, sigma: f64) -> FilterResult<Raster> {
    let kernel = Kernel::gaussian(sigma)?;
    Ok(convolve(raster, &kernel))
}

#[inline]
fn to_channel(value: f64) -> u8 {
    (value * CHANNEL_SCALE).round().clamp(0.0, CHANNEL_SCALE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: [[u8; 3]; 3]) -> Raster {
        Raster::from_rows(values.map(|row| row.map(Pixel::gray))).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let raster = grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let mut kernel = Kernel::new(3).unwrap();
        kernel.set(1, 1, 1.0);
        assert_eq!(convolve(&raster, &kernel), raster);
    }

    #[test]
    fn test_corner_replicates_edge() {
        // Box kernel at the top-left corner: taps outside the raster read
        // the corner's own row/column.
        let raster = grid([[90, 0, 0], [0, 0, 0], [0, 0, 0]]);
        let kernel = Kernel::from_slice(3, &[1.0; 9]).unwrap();
        // taps: (0,0) x4 from replication of row -1 / col -1, plus
        // (1,0) x2, (0,1) x2, (1,1) x1 -> 4 * 90
        assert_eq!(sample_neighborhood(&raster, 0, 0, &kernel), Pixel::gray(255));
        let kernel = Kernel::from_slice(3, &[1.0 / 9.0; 9]).unwrap();
        assert_eq!(sample_neighborhood(&raster, 0, 0, &kernel), Pixel::gray(40));
    }

    #[test]
    fn test_large_kernel_pins_to_own_coordinate() {
        // 1x5 row, 5x5 kernel weighting only the tap two columns left.
        let raster = Raster::from_rows([[10, 20, 30, 40, 50].map(Pixel::gray)]).unwrap();
        let mut kernel = Kernel::new(5).unwrap();
        kernel.set(0, 2, 1.0);
        // x=1: x-2 is outside, so the tap reads column 1 itself (not column 0)
        assert_eq!(sample_neighborhood(&raster, 1, 0, &kernel), Pixel::gray(20));
        assert_eq!(sample_neighborhood(&raster, 2, 0, &kernel), Pixel::gray(10));
    }

    #[test]
    fn test_output_is_clamped() {
        let raster = grid([[0, 0, 0], [0, 200, 0], [0, 0, 0]]);
        let out = convolve(&raster, &Kernel::sharpen());
        assert_eq!(out.pixel(1, 1), Pixel::gray(255));
        assert_eq!(out.pixel(0, 1), Pixel::gray(0));
    }

    #[test]
    fn test_gaussian_blur_of_uniform_is_uniform() {
        let raster = Raster::filled(6, 4, Pixel::new(12, 130, 250));
        assert_eq!(gaussian_blur(&raster, 1.5).unwrap(), raster);
    }

    #[test]
    fn test_gaussian_blur_rejects_sigma() {
        assert!(gaussian_blur(&Raster::new(2, 2), 0.0).is_err());
    }
}
