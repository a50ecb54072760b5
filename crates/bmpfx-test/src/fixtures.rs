//! Synthetic rasters used across the test suites

use bmpfx_core::{Pixel, Raster};
use bmpfx_io::{Bitmap, encode};

/// Raster whose channels vary independently along x, y and x+y.
pub fn gradient(width: usize, height: usize) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        Pixel::new(
            (x * 255 / width.max(2).saturating_sub(1)) as u8,
            (y * 255 / height.max(2).saturating_sub(1)) as u8,
            ((x + y) * 17 % 256) as u8,
        )
    })
}

/// Black and white squares of `cell` pixels, white in the top-left.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Raster {
    let cell = cell.max(1);
    Raster::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    })
}

/// Raster with every pixel distinct (for rasters under 2^24 pixels).
pub fn numbered(width: usize, height: usize) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        let n = y * width + x;
        Pixel::new((n & 0xff) as u8, ((n >> 8) & 0xff) as u8, ((n >> 16) & 0xff) as u8)
    })
}

/// Encode a raster as a fresh bitmap file image.
///
/// # Panics
///
/// Panics if the raster is empty.
pub fn bmp_bytes(raster: &Raster) -> Vec<u8> {
    encode(&Bitmap::from_raster(raster.clone())).expect("encode fixture")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_is_distinct() {
        let raster = numbered(20, 20);
        let mut seen: Vec<Pixel> = raster.pixels().copied().collect();
        seen.sort_by_key(|p| p.channels());
        seen.dedup();
        assert_eq!(seen.len(), 400);
    }

    #[test]
    fn test_gradient_corners() {
        let raster = gradient(5, 3);
        assert_eq!(raster.pixel(0, 0).r, 0);
        assert_eq!(raster.pixel(4, 0).r, 255);
        assert_eq!(raster.pixel(0, 2).g, 255);
    }
}
