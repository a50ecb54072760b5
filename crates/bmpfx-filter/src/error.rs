//! Error types for bmpfx-filter
//!
//! Every variant except `Core` is a parameter error: the filter could not
//! be built from the name and arguments it was given. Filters that build
//! successfully do not fail on well-formed rasters.

use thiserror::Error;

/// Errors that can occur while building or applying filters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bmpfx_core::Error),

    /// Filter name not in the filter table
    #[error("{0} is not a valid filter name")]
    UnknownFilter(String),

    /// Wrong number of parameters for a filter
    #[error("wrong amount of params for filter {filter}: expected {expected}, got {actual}")]
    WrongParamCount {
        /// Filter name
        filter: &'static str,
        /// Parameters the filter takes
        expected: usize,
        /// Parameters supplied
        actual: usize,
    },

    /// A parameter could not be parsed or is out of range
    #[error("wrong arguments for filter {filter}: {value:?} {reason}")]
    InvalidArgument {
        /// Filter name
        filter: &'static str,
        /// Offending parameter text
        value: String,
        /// What was expected
        reason: &'static str,
    },

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
