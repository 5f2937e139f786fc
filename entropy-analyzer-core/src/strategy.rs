// entropy-analyzer-core/src/strategy.rs
//! Defines the core `EntropyStrategy` trait and the closed set of strategies.
//!
//! The `EntropyStrategy` trait is the contract every scorer adheres to: take an
//! optional, dynamically shaped input and return a unit-interval score, or an
//! `InvalidInput` error when the shape is wrong. The [`Strategy`] enum is the
//! closed union of the five built-in scorers handed out by the factory.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::AnalyzerConfig;
use crate::datum::Datum;
use crate::errors::EntropyError;
use crate::strategies::contextual::ContextualEntropy;
use crate::strategies::numerical::NumericalEntropy;
use crate::strategies::search::SearchEngineEntropy;
use crate::strategies::text::TextEntropy;
use crate::strategies::time::TimeEntropy;

/// A trait that defines the core functionality of an entropy strategy.
///
/// Implementations must uphold three laws:
///
/// * every `Ok` value lies in `[0.0, 1.0]`,
/// * an absent input (`None`) scores `0.0`,
/// * a present input of the wrong shape yields [`EntropyError::InvalidInput`].
pub trait EntropyStrategy: Send + Sync {
    /// The registry token this strategy answers to.
    fn kind(&self) -> StrategyKind;

    /// Scores `data` in `[0.0, 1.0]`.
    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError>;
}

/// Names of the registered strategies, as accepted by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Text,
    Numerical,
    Search,
    Contextual,
    Time,
}

impl StrategyKind {
    /// Every registered kind, in registry order.
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Text,
        StrategyKind::Numerical,
        StrategyKind::Search,
        StrategyKind::Contextual,
        StrategyKind::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Text => "text",
            StrategyKind::Numerical => "numerical",
            StrategyKind::Search => "search",
            StrategyKind::Contextual => "contextual",
            StrategyKind::Time => "time",
        }
    }

    /// The input shape this kind expects.
    pub fn input_shape(&self) -> &'static str {
        match self {
            StrategyKind::Text | StrategyKind::Contextual => "string",
            StrategyKind::Numerical => "list of numbers",
            StrategyKind::Search => "list of strings",
            StrategyKind::Time => "list of ISO-8601 timestamps",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Text => "Shannon entropy of the character distribution (bits / 8)",
            StrategyKind::Numerical => "Entropy of an auto-binned histogram density (nats / 8)",
            StrategyKind::Search => "Mean spread of character 2-3-gram TF-IDF weights across results",
            StrategyKind::Contextual => "Language-model unpredictability rating, character entropy on failure",
            StrategyKind::Time => "Entropy of range-normalized inter-arrival gaps (nats / 8)",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = EntropyError;

    /// Tokens are matched exactly; `"Text"` is not `"text"`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == token)
            .ok_or_else(|| EntropyError::invalid(format!("Invalid Strategy Type: {}", token)))
    }
}

/// The closed union of built-in strategies.
#[derive(Debug, Clone)]
pub enum Strategy {
    Text(TextEntropy),
    Numerical(NumericalEntropy),
    Search(SearchEngineEntropy),
    Contextual(ContextualEntropy),
    Time(TimeEntropy),
}

impl Strategy {
    /// Builds the strategy for `kind` with the constants in `config`.
    pub fn from_config(kind: StrategyKind, config: &AnalyzerConfig) -> Self {
        let normalization = config.normalization();
        match kind {
            StrategyKind::Text => Strategy::Text(TextEntropy::with_normalization(normalization)),
            StrategyKind::Numerical => Strategy::Numerical(NumericalEntropy::with_normalization(normalization)),
            StrategyKind::Search => Strategy::Search(SearchEngineEntropy::new()),
            StrategyKind::Contextual => Strategy::Contextual(ContextualEntropy::from_config(config)),
            StrategyKind::Time => Strategy::Time(TimeEntropy::with_normalization(normalization)),
        }
    }

    fn inner(&self) -> &dyn EntropyStrategy {
        match self {
            Strategy::Text(s) => s,
            Strategy::Numerical(s) => s,
            Strategy::Search(s) => s,
            Strategy::Contextual(s) => s,
            Strategy::Time(s) => s,
        }
    }
}

impl EntropyStrategy for Strategy {
    fn kind(&self) -> StrategyKind {
        self.inner().kind()
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        self.inner().compute_entropy(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_from_str() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_token_is_rejected_with_token_in_message() {
        let err = "fuzzy".parse::<StrategyKind>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Invalid Strategy Type: fuzzy"));
        assert!("Text".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn strategy_reports_its_kind() {
        let config = AnalyzerConfig::default();
        for kind in StrategyKind::ALL {
            assert_eq!(Strategy::from_config(kind, &config).kind(), kind);
        }
    }
}
