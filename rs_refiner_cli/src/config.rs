use std::path::Path;

use anyhow::{Context, Result};
use rs_refiner::{RegoConfig, TargetingConfig};
use serde::Deserialize;

/// Settings read from `--config <file.toml>`.
///
/// ```toml
/// seed = 42
///
/// [targeting]
/// num_targets = 5
/// budget = 3.0
/// parallel = true
///
/// [rego]
/// iterations = 2000
/// max_pair_draws = 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub seed: Option<u64>,
    pub targeting: TargetingConfig,
    pub rego: RegoConfig,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line values win over the file.
    pub fn with_targeting_overrides(
        mut self,
        num_targets: Option<usize>,
        budget: Option<f64>,
        parallel: bool,
    ) -> Self {
        if let Some(num_targets) = num_targets {
            self.targeting.num_targets = num_targets;
        }
        if budget.is_some() {
            self.targeting.budget = budget;
        }
        if parallel {
            self.targeting.parallel = true;
        }
        self
    }

    pub fn with_rego_overrides(
        mut self,
        iterations: Option<usize>,
        max_pair_draws: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(iterations) = iterations {
            self.rego.iterations = iterations;
        }
        if let Some(max_pair_draws) = max_pair_draws {
            self.rego.max_pair_draws = max_pair_draws;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}
