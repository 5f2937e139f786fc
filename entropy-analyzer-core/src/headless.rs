// entropy-analyzer-core/src/headless.rs
//! `headless.rs`
//! Convenience wrappers for scoring data in one call, without building a
//! factory or workflow by hand.

use anyhow::{Context, Result};

use crate::config::AnalyzerConfig;
use crate::datum::Datum;
use crate::factory::EntropyFactory;
use crate::strategy::EntropyStrategy;

/// Scores `data` with the strategy named `strategy`, using the constants in `config`.
///
/// # Arguments
///
/// * `config` - The merged configuration (defaults + optional user overrides).
/// * `strategy` - A strategy token such as `"text"` or `"time"`.
/// * `data` - The input; `None` scores 0.0.
pub fn headless_compute_entropy(config: &AnalyzerConfig, strategy: &str, data: Option<&Datum>) -> Result<f64> {
    let factory = EntropyFactory::from_config(config);
    let strategy = factory.get(Some(strategy))?;
    let score = strategy
        .compute_entropy(data)
        .with_context(|| format!("Failed to score input with the '{}' strategy", strategy.kind()))?;
    Ok(score)
}

/// Like [`headless_compute_entropy`], with the input given as a JSON document.
pub fn headless_compute_entropy_json(config: &AnalyzerConfig, strategy: &str, json: &str) -> Result<f64> {
    let data = Datum::from_json(json).context("Input is not valid JSON")?;
    headless_compute_entropy(config, strategy, Some(&data))
}
