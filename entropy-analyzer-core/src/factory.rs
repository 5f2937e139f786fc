// entropy-analyzer-core/src/factory.rs
//! The strategy registry.
//!
//! An [`EntropyFactory`] holds one instance of every strategy and hands out
//! shared references by token. The process-wide registry returned by
//! [`EntropyFactory::global`] is built once with default settings and never
//! mutated afterwards.

use log::debug;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::datum::{present, Datum};
use crate::errors::EntropyError;
use crate::judge::JudgeClient;
use crate::strategies::contextual::ContextualEntropy;
use crate::strategy::{Strategy, StrategyKind};

static GLOBAL_FACTORY: Lazy<EntropyFactory> = Lazy::new(EntropyFactory::default);

/// An immutable registry mapping each [`StrategyKind`] to its strategy.
#[derive(Debug, Clone)]
pub struct EntropyFactory {
    text: Strategy,
    numerical: Strategy,
    search: Strategy,
    contextual: Strategy,
    time: Strategy,
}

impl Default for EntropyFactory {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

impl EntropyFactory {
    /// The shared registry with default settings.
    pub fn global() -> &'static EntropyFactory {
        &GLOBAL_FACTORY
    }

    /// Builds every strategy with the constants and judge settings in `config`.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        debug!("Building strategy registry (ceiling {})", config.normalization().ceiling);
        Self {
            text: Strategy::from_config(StrategyKind::Text, config),
            numerical: Strategy::from_config(StrategyKind::Numerical, config),
            search: Strategy::from_config(StrategyKind::Search, config),
            contextual: Strategy::from_config(StrategyKind::Contextual, config),
            time: Strategy::from_config(StrategyKind::Time, config),
        }
    }

    /// Like [`Self::from_config`], with the contextual strategy using `judge`.
    pub fn with_judge(config: &AnalyzerConfig, judge: Arc<dyn JudgeClient>) -> Self {
        let mut factory = Self::from_config(config);
        factory.contextual = Strategy::Contextual(ContextualEntropy::from_config(config).with_judge(judge));
        factory
    }

    /// Looks up a strategy by token.
    ///
    /// Fails with `InvalidInput` when the token is absent or unknown.
    pub fn get(&self, token: Option<&str>) -> Result<&Strategy, EntropyError> {
        let token = token.ok_or_else(|| EntropyError::invalid("Strategy type must be a string, got None"))?;
        let kind: StrategyKind = token.parse()?;
        Ok(self.get_kind(kind))
    }

    /// Looks up a strategy by a dynamically typed token; only strings are accepted.
    pub fn get_from_datum(&self, token: Option<&Datum>) -> Result<&Strategy, EntropyError> {
        match present(token) {
            None => self.get(None),
            Some(Datum::Text(s)) => self.get(Some(s.as_str())),
            Some(other) => Err(EntropyError::invalid(format!(
                "Strategy type must be a string, got {} ({})",
                other.type_name(),
                other
            ))),
        }
    }

    pub fn get_kind(&self, kind: StrategyKind) -> &Strategy {
        match kind {
            StrategyKind::Text => &self.text,
            StrategyKind::Numerical => &self.numerical,
            StrategyKind::Search => &self.search,
            StrategyKind::Contextual => &self.contextual,
            StrategyKind::Time => &self.time,
        }
    }

    /// Every registered kind.
    pub fn kinds() -> &'static [StrategyKind] {
        &StrategyKind::ALL
    }
}
