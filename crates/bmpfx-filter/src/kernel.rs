//! Convolution kernels
//!
//! A [`Kernel`] is a square matrix of `f64` weights with an odd side
//! length, stored row-major. Its center cell sits over the target pixel.

use crate::{FilterError, FilterResult};
use std::f64::consts::PI;

/// Smallest Gaussian kernel side
pub const MIN_GAUSSIAN_SIZE: usize = 5;

/// Kernel side per unit of sigma
const GAUSSIAN_SIZE_PER_SIGMA: f64 = 3.0;

const SHARPEN: [f64; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
const EDGE_DETECT: [f64; 9] = [0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0];

/// A square 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length (odd)
    size: usize,
    /// Weights (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zero kernel with the given side length.
    pub fn new(size: usize) -> FilterResult<Self> {
        let len = check_size(size)?;
        Ok(Self {
            size,
            data: vec![0.0; len],
        })
    }

    /// Create a kernel from row-major weights.
    pub fn from_slice(size: usize, data: &[f64]) -> FilterResult<Self> {
        let len = check_size(size)?;
        if data.len() != len {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for a {}x{} kernel, got {}",
                len,
                size,
                size,
                data.len()
            )));
        }
        Ok(Self {
            size,
            data: data.to_vec(),
        })
    }

    /// 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Self {
            size: 3,
            data: SHARPEN.to_vec(),
        }
    }

    /// 3x3 Laplacian kernel used by edge detection.
    pub fn edge_detect() -> Self {
        Self {
            size: 3,
            data: EDGE_DETECT.to_vec(),
        }
    }

    /// Side length of the Gaussian kernel for `sigma`.
    ///
    /// `max(5, round(3 * sigma))`, decremented by one if even.
    pub fn gaussian_size(sigma: f64) -> usize {
        let size = ((GAUSSIAN_SIZE_PER_SIGMA * sigma).round() as usize).max(MIN_GAUSSIAN_SIZE);
        if size % 2 == 0 { size - 1 } else { size }
    }

    /// Create a normalized Gaussian kernel for `sigma`.
    ///
    /// Weights follow `exp(-(dx² + dy²) / 2σ²)` where the distances are
    /// measured from `size / 2` in real arithmetic, so the peak lies half a
    /// cell below and to the right of the middle cell. Weights sum to 1.
    pub fn gaussian(sigma: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }
        let size = Self::gaussian_size(sigma);
        let center = size as f64 / 2.0;
        let coefficient = 2.0 * sigma * sigma;
        let mut kernel = Self::new(size)?;
        for y in 0..size {
            let dy = center - y as f64;
            for x in 0..size {
                let dx = center - x as f64;
                kernel.data[y * size + x] =
                    (-(dy * dy + dx * dx) / coefficient).exp() / (PI * coefficient);
            }
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center cell to the edge.
    #[inline]
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Weights in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.size && y < self.size {
            Some(self.data[y * self.size + x])
        } else {
            None
        }
    }

    /// Set the weight at column `x`, row `y`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if x < self.size && y < self.size {
            self.data[y * self.size + x] = value;
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Scale weights so they sum to 1. A zero-sum kernel is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for w in &mut self.data {
                *w /= sum;
            }
        }
    }
}

/// Validate a side length and return the number of weights.
fn check_size(size: usize) -> FilterResult<usize> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel side must be odd and positive, got {}",
            size
        )));
    }
    size.checked_mul(size).ok_or_else(|| {
        FilterError::InvalidKernel(format!("kernel side {} is too large", size))
    })
}
