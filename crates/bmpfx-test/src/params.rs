//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use bmpfx_core::Raster;
use bmpfx_io::{Bitmap, decode, encode};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results in memory (default)
    #[default]
    Compare,
    /// Compare, and also write rasters out for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current comparison, and every
/// failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "sharpen")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality
    ///
    /// Reports the first mismatching pixel.
    pub fn compare_raster(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if expected.width() != actual.width() || expected.height() != actual.height() {
            self.fail(format!(
                "raster comparison for index {} - dimension mismatch: {}x{} vs {}x{}",
                self.index,
                expected.width(),
                expected.height(),
                actual.width(),
                actual.height()
            ));
            return false;
        }

        for y in 0..expected.height() {
            for x in 0..expected.width() {
                let (p1, p2) = (expected.pixel(x, y), actual.pixel(x, y));
                if p1 != p2 {
                    self.fail(format!(
                        "raster comparison for index {} - pixel mismatch at ({}, {}): {:?} vs {:?}",
                        self.index, x, y, p1, p2
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Compare two byte strings
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "string comparison for index {}\n\
                 sizes: {} vs {}",
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Encode a raster, decode it back and check that nothing changed
    ///
    /// In display mode the encoded file is also written to
    /// `{regout}/{test_name}.{index}.bmp`.
    pub fn write_raster(&mut self, raster: &Raster) -> TestResult<()> {
        self.index += 1;

        let local_path = format!("{}/{}.{:02}.bmp", regout_dir(), self.test_name, self.index);
        let codec_error = |e: bmpfx_io::FormatError| TestError::Codec {
            path: local_path.clone(),
            message: e.to_string(),
        };

        let data = encode(&Bitmap::from_raster(raster.clone())).map_err(codec_error)?;
        if self.display() {
            fs::create_dir_all(regout_dir())?;
            fs::write(&local_path, &data)?;
            eprintln!("Wrote: {}", local_path);
        }

        let decoded = decode(&data).map_err(codec_error)?;
        if &decoded.raster != raster {
            self.fail(format!(
                "raster write for index {} did not survive a codec round trip",
                self.index
            ));
        }
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn fail(&mut self, detail: String) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, detail);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }
}
