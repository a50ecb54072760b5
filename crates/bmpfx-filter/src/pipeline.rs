//! Filter pipeline
//!
//! [`Pipeline::build`] resolves and validates every [`FilterSpec`] before
//! any filter runs, so a bad name or parameter aborts the whole run with the
//! raster untouched. [`Pipeline::run`] then applies the filters in
//! declaration order, each one's output feeding the next.

use crate::{Filter, FilterError, FilterKind, FilterResult};
use bmpfx_core::Raster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Environment variable holding a fixed shuffle seed
pub const SEED_ENV_VAR: &str = "BMPFX_SEED";

/// A filter name with its raw string parameters, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Filter name, matched exactly against the filter table
    pub name: String,
    /// Parameters in order
    pub params: Vec<String>,
}

impl FilterSpec {
    /// Create a spec from a name and parameters.
    pub fn new<N, I, P>(name: N, params: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Look up a filter kind by exact, case-sensitive name.
pub fn resolve(name: &str) -> Option<FilterKind> {
    FilterKind::resolve(name)
}

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Seed for the shuffle RNG. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl PipelineConfig {
    /// Configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Read configuration from the environment.
    ///
    /// `BMPFX_SEED` sets [`PipelineConfig::seed`]; a value that is not a
    /// decimal `u64` is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_seed_var(std::env::var(SEED_ENV_VAR).ok().as_deref())
    }

    fn from_seed_var(value: Option<&str>) -> Self {
        let seed = value.and_then(|v| match v.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(value = v, "ignoring unparsable {}", SEED_ENV_VAR);
                None
            }
        });
        Self { seed }
    }
}

/// An ordered list of validated filters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pipeline {
    filters: Vec<Filter>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Resolve and validate every spec.
    ///
    /// # Errors
    ///
    /// The first unknown name ([`FilterError::UnknownFilter`]) or invalid
    /// parameter list, in declaration order.
    pub fn build(specs: &[FilterSpec], config: PipelineConfig) -> FilterResult<Self> {
        let filters = specs
            .iter()
            .map(|spec| {
                let kind = resolve(&spec.name)
                    .ok_or_else(|| FilterError::UnknownFilter(spec.name.clone()))?;
                Filter::new(kind, &spec.params)
            })
            .collect::<FilterResult<Vec<_>>>()?;

        debug!(count = filters.len(), "built filter pipeline");
        Ok(Self { filters, config })
    }

    /// Create a pipeline from already-built filters.
    pub fn from_filters(filters: Vec<Filter>, config: PipelineConfig) -> Self {
        Self { filters, config }
    }

    /// The filters in application order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if the pipeline has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply every filter in order.
    ///
    /// A single `StdRng` seeded from the configuration (or a fresh random
    /// seed) is shared by all shuffle stages of the run.
    pub fn run(&self, raster: &mut Raster) -> FilterResult<()> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        if self.filters.iter().any(|f| f.kind() == FilterKind::Shuffle) {
            info!(seed, "shuffle seed");
        }
        self.run_with_rng(raster, &mut StdRng::seed_from_u64(seed))
    }

    /// Apply every filter in order with an explicit randomness source.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        raster: &mut Raster,
        rng: &mut R,
    ) -> FilterResult<()> {
        for (stage, filter) in self.filters.iter().enumerate() {
            debug!(
                stage,
                filter = filter.kind().name(),
                width = raster.width(),
                height = raster.height(),
                "applying filter"
            );
            filter.apply_with_rng(raster, rng)?;
        }
        Ok(())
    }
}
