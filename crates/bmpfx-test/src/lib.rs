//! bmpfx-test - Regression test framework for bmpfx
//!
//! Provides [`RegParams`], which numbers and records every comparison made
//! by a test so that all failures are reported together at cleanup, plus
//! synthetic raster fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use bmpfx_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("negative");
//! let raster = fixtures::gradient(8, 8);
//! rp.compare_values(8.0, raster.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display". Display mode
//!   additionally writes every raster passed to [`RegParams::write_raster`]
//!   under [`regout_dir`] for visual inspection.

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bmpfx-test is at crates/bmpfx-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/target/regout", workspace_root())
}
