//! Raster - the in-memory pixel grid
//!
//! A `Raster` owns a row-major `Vec<Pixel>` of `width * height` pixels.
//! Row 0 is the top row. All rows have the same width by construction.
//!
//! # Ownership model
//!
//! A raster is exclusively owned by whichever stage currently holds it:
//! the codec while decoding, the filter pipeline while transforming, and
//! the codec again while encoding. It is never shared.

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// An owned, top-down grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

impl Raster {
    /// Create a black raster of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Pixel::BLACK)
    }

    /// Create a raster with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            data: vec![pixel; width * height],
        }
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a raster from top-down rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRows`] if the rows differ in length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Pixel]>,
    {
        let mut data = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(Error::RaggedRows {
                    row: index,
                    expected,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            data,
        })
    }

    /// Create a raster from a row-major pixel vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<Pixel>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the raster holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Get the pixel at column `x`, row `y` without a bounds result.
    ///
    /// The coordinate must lie inside the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Set the pixel at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.data[index] = pixel;
        Ok(())
    }

    /// Borrow row `y`.
    pub fn row(&self, y: usize) -> Option<&[Pixel]> {
        (y < self.height).then(|| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// Mutably borrow row `y`.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [Pixel]> {
        if y < self.height {
            Some(&mut self.data[y * self.width..(y + 1) * self.width])
        } else {
            None
        }
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            raster: self,
            front: 0,
            back: self.height,
        }
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = &Pixel> {
        self.data.iter()
    }

    /// Mutably iterate over all pixels in row-major order.
    pub fn pixels_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Pixel> {
        self.data.iter_mut()
    }

    /// Row-major pixel slice.
    pub fn as_slice(&self) -> &[Pixel] {
        &self.data
    }

    /// Truncate or extend the row sequence to `height` rows.
    ///
    /// New rows are black.
    pub fn resize_height(&mut self, height: usize) {
        self.data.resize(height * self.width, Pixel::BLACK);
        self.height = height;
    }

    /// Truncate or extend every row to `width` columns.
    ///
    /// New columns are black.
    pub fn resize_width(&mut self, width: usize) {
        if width == self.width {
            return;
        }
        let mut data = Vec::with_capacity(width * self.height);
        for row in self.rows() {
            let keep = width.min(row.len());
            data.extend_from_slice(&row[..keep]);
            data.resize(data.len() + (width - keep), Pixel::BLACK);
        }
        self.data = data;
        self.width = width;
    }

    /// Shrink to at most `width` x `height`, keeping the top-left corner.
    ///
    /// Each axis is clamped independently; the raster never grows.
    pub fn crop(&mut self, width: usize, height: usize) {
        if height < self.height {
            self.resize_height(height);
        }
        if width < self.width {
            self.resize_width(width);
        }
    }

    /// Swap two `width` x `height` blocks whose top-left corners are `a` and `b`.
    ///
    /// Corners are `(x, y)` pairs. Blocks are swapped pixel by pixel in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if either block leaves the raster.
    pub fn swap_blocks(
        &mut self,
        a: (usize, usize),
        b: (usize, usize),
        width: usize,
        height: usize,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        for &(x, y) in &[a, b] {
            self.index_of(x + width - 1, y + height - 1)?;
        }
        for dy in 0..height {
            for dx in 0..width {
                let i = (a.1 + dy) * self.width + a.0 + dx;
                let j = (b.1 + dy) * self.width + b.0 + dx;
                self.data.swap(i, j);
            }
        }
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Top-down iterator over the rows of a [`Raster`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    raster: &'a Raster,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let row = self.raster.row(self.front);
        self.front += 1;
        row
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Rows<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.raster.row(self.back)
    }
}

impl ExactSizeIterator for Rows<'_> {}
