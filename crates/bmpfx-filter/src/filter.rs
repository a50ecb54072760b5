//! Filter kinds and validated filter instances
//!
//! A [`Filter`] is built from a [`FilterKind`] and a list of string
//! parameters. All parsing and range checks happen at construction, so a
//! built filter applies to any raster without failing on its parameters.

use crate::color::{grayscale, negative};
use crate::convolve::convolve;
use crate::edge::{edge_detect, sharpen};
use crate::shuffle::{crop, shuffle_tiles};
use crate::{FilterError, FilterResult, Kernel};
use bmpfx_core::Raster;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// The fixed set of filters, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// `crop <width> <height>`
    Crop,
    /// `gs`
    Grayscale,
    /// `neg`
    Negative,
    /// `sharp`
    Sharpening,
    /// `edge <threshold>`
    EdgeDetection,
    /// `blur <sigma>`
    GaussianBlur,
    /// `shuffle <pieces>`
    Shuffle,
}

impl FilterKind {
    /// Every filter kind, in table order.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Crop,
        FilterKind::Grayscale,
        FilterKind::Negative,
        FilterKind::Sharpening,
        FilterKind::EdgeDetection,
        FilterKind::GaussianBlur,
        FilterKind::Shuffle,
    ];

    /// Name used to select this filter.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Crop => "crop",
            FilterKind::Grayscale => "gs",
            FilterKind::Negative => "neg",
            FilterKind::Sharpening => "sharp",
            FilterKind::EdgeDetection => "edge",
            FilterKind::GaussianBlur => "blur",
            FilterKind::Shuffle => "shuffle",
        }
    }

    /// Number of parameters this filter takes.
    pub fn param_count(self) -> usize {
        match self {
            FilterKind::Crop => 2,
            FilterKind::Grayscale | FilterKind::Negative | FilterKind::Sharpening => 0,
            FilterKind::EdgeDetection | FilterKind::GaussianBlur | FilterKind::Shuffle => 1,
        }
    }

    /// Look up a filter by exact, case-sensitive name.
    pub fn resolve(name: &str) -> Option<FilterKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// A validated filter, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Shrink to at most `width` x `height`
    Crop { width: usize, height: usize },
    /// Luminance on all channels
    Grayscale,
    /// Invert every channel
    Negative,
    /// 3x3 sharpening convolution
    Sharpening,
    /// Grayscale, Laplacian, then threshold on the red channel
    EdgeDetection { threshold: u8 },
    /// Gaussian convolution with a precomputed kernel
    GaussianBlur { sigma: f64, kernel: Kernel },
    /// Swap `side * side` tiles in random pairs
    Shuffle { pieces: usize, side: usize },
}

impl Filter {
    /// Build a filter from its kind and string parameters.
    ///
    /// # Errors
    ///
    /// - [`FilterError::WrongParamCount`] if the number of parameters is
    ///   wrong for `kind`
    /// - [`FilterError::InvalidArgument`] if a parameter does not parse or
    ///   is out of range
    pub fn new<S: AsRef<str>>(kind: FilterKind, params: &[S]) -> FilterResult<Self> {
        if params.len() != kind.param_count() {
            return Err(FilterError::WrongParamCount {
                filter: kind.name(),
                expected: kind.param_count(),
                actual: params.len(),
            });
        }
        let param = |i: usize| params[i].as_ref();

        let filter = match kind {
            FilterKind::Crop => Filter::Crop {
                width: parse_positive(kind, param(0))?,
                height: parse_positive(kind, param(1))?,
            },
            FilterKind::Grayscale => Filter::Grayscale,
            FilterKind::Negative => Filter::Negative,
            FilterKind::Sharpening => Filter::Sharpening,
            FilterKind::EdgeDetection => Filter::EdgeDetection {
                threshold: parse_digits(param(0)).ok_or_else(|| {
                    invalid(kind, param(0), "is not an integer threshold in 0..=255")
                })?,
            },
            FilterKind::GaussianBlur => {
                let sigma: f64 = param(0)
                    .parse()
                    .map_err(|_| invalid(kind, param(0), "is not a number"))?;
                let kernel = Kernel::gaussian(sigma)
                    .map_err(|_| invalid(kind, param(0), "is not a usable sigma"))?;
                Filter::GaussianBlur { sigma, kernel }
            }
            FilterKind::Shuffle => {
                let pieces = parse_positive(kind, param(0))?;
                let side = pieces.isqrt();
                if side * side != pieces {
                    return Err(invalid(kind, param(0), "is not a perfect square"));
                }
                Filter::Shuffle { pieces, side }
            }
        };
        Ok(filter)
    }

    /// The kind this filter was built from.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Crop { .. } => FilterKind::Crop,
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Negative => FilterKind::Negative,
            Filter::Sharpening => FilterKind::Sharpening,
            Filter::EdgeDetection { .. } => FilterKind::EdgeDetection,
            Filter::GaussianBlur { .. } => FilterKind::GaussianBlur,
            Filter::Shuffle { .. } => FilterKind::Shuffle,
        }
    }

    /// Apply the filter, drawing shuffle randomness from the thread RNG.
    pub fn apply(&self, raster: &mut Raster) -> FilterResult<()> {
        self.apply_with_rng(raster, &mut rand::rng())
    }

    /// Apply the filter with an explicit randomness source.
    ///
    /// Only [`Filter::Shuffle`] draws from `rng`.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        raster: &mut Raster,
        rng: &mut R,
    ) -> FilterResult<()> {
        match self {
            Filter::Crop { width, height } => crop(raster, *width, *height),
            Filter::Grayscale => grayscale(raster),
            Filter::Negative => negative(raster),
            Filter::Sharpening => *raster = sharpen(raster),
            Filter::EdgeDetection { threshold } => *raster = edge_detect(raster, *threshold),
            Filter::GaussianBlur { kernel, .. } => *raster = convolve(raster, kernel),
            Filter::Shuffle { side, .. } => shuffle_tiles(raster, *side, rng)?,
        }
        Ok(())
    }
}

fn parse_positive(kind: FilterKind, value: &str) -> FilterResult<usize> {
    match parse_digits::<usize>(value) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(invalid(kind, value, "is not a positive integer")),
    }
}

/// Plain decimal digits only; `str::parse` would also take a leading `+`.
fn parse_digits<T: FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn invalid(kind: FilterKind, value: &str, reason: &'static str) -> FilterError {
    FilterError::InvalidArgument {
        filter: kind.name(),
        value: value.to_string(),
        reason,
    }
}
