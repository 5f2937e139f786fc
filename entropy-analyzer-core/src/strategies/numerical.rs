// entropy-analyzer-core/src/strategies/numerical.rs
//! Histogram entropy of a numeric sample.

use entropy_analyzer_stats::entropy::{shannon_entropy, LogBase};
use entropy_analyzer_stats::histogram::{span_is_finite, Histogram};
use entropy_analyzer_stats::scoring::Normalization;
use log::debug;

use super::expect_list;
use crate::datum::Datum;
use crate::errors::EntropyError;
use crate::strategy::{EntropyStrategy, StrategyKind};

/// Scores a list of numbers by the entropy (in nats) of its binned density.
///
/// The sample is binned with the "auto" width rule, each bin density is padded
/// with epsilon so empty bins stay defined, and the entropy of the resulting
/// distribution is divided by the normalization ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericalEntropy {
    normalization: Normalization,
}

impl NumericalEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalization(normalization: Normalization) -> Self {
        Self { normalization }
    }

    /// Scores an already-numeric sample. Fails on NaN or infinite values, and on
    /// finite values whose span overflows.
    pub fn score(&self, numbers: Option<&[f64]>) -> Result<f64, EntropyError> {
        let Some(numbers) = numbers.filter(|n| !n.is_empty()) else {
            return Ok(0.0);
        };
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(EntropyError::invalid("Input contains non-finite values"));
        }
        if !span_is_finite(numbers) {
            return Err(EntropyError::invalid("Input range is too wide to bin (max - min overflows)"));
        }
        if numbers.len() < 2 {
            return Ok(0.0);
        }

        let hist = Histogram::auto(numbers);
        let padded: Vec<f64> = hist
            .densities()
            .into_iter()
            .map(|density| density + self.normalization.epsilon)
            .collect();
        let nats = shannon_entropy(&padded, LogBase::E);
        debug!(
            "Numerical entropy: {:.4} nats over {} bins ({} values)",
            nats,
            hist.bin_count(),
            numbers.len()
        );
        Ok(self.normalization.score(nats))
    }
}

impl EntropyStrategy for NumericalEntropy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Numerical
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        let Some(items) = expect_list(data, "list of numbers")? else {
            return Ok(0.0);
        };
        if items.is_empty() {
            return Ok(0.0);
        }
        let numbers = items
            .iter()
            .map(|item| {
                item.as_f64().ok_or_else(|| {
                    EntropyError::invalid(format!("All elements must be numbers, got {}", item.type_name()))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        self.score(Some(numbers.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_empty_and_single_score_zero() {
        let s = NumericalEntropy::new();
        assert_eq!(s.score(None).unwrap(), 0.0);
        assert_eq!(s.score(Some(&[][..])).unwrap(), 0.0);
        assert_eq!(s.score(Some(&[42.0][..])).unwrap(), 0.0);
        assert_eq!(s.compute_entropy(Some(&Datum::List(vec![]))).unwrap(), 0.0);
    }

    #[test]
    fn overflowing_span_is_rejected() {
        let s = NumericalEntropy::new();
        let err = s.score(Some(&[-1e308, 1e308][..])).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("too wide"));

        let small = s.score(Some(&[-1.0, 1.0][..])).unwrap();
        assert!(small > 0.0 && small < 1.0);
    }

    #[test]
    fn constant_sample_scores_zero() {
        let score = NumericalEntropy::new().score(Some(&[7.0, 7.0, 7.0, 7.0][..])).unwrap();
        assert!(score.abs() < 1e-9);
    }

    #[test]
    fn one_to_five_matches_hand_computed_value() {
        // Four unit bins with counts [1, 1, 1, 2]: p = [0.2, 0.2, 0.2, 0.4].
        let expected = -(3.0 * 0.2 * 0.2f64.ln() + 0.4 * 0.4f64.ln()) / 8.0;
        let score = NumericalEntropy::new().score(Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..])).unwrap();
        assert!((score - expected).abs() < 1e-6, "got {}, expected {}", score, expected);
    }

    #[test]
    fn integers_and_floats_mix() {
        let data = Datum::List(vec![Datum::Int(1), Datum::Float(2.0), Datum::Int(3), Datum::Int(4), Datum::Float(5.0)]);
        let via_datum = NumericalEntropy::new().compute_entropy(Some(&data)).unwrap();
        let direct = NumericalEntropy::new().score(Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..])).unwrap();
        assert_eq!(via_datum, direct);
    }

    #[test]
    fn rejects_non_numeric_elements() {
        let data = Datum::List(vec![Datum::Int(1), Datum::from("two"), Datum::Int(3)]);
        let err = NumericalEntropy::new().compute_entropy(Some(&data)).unwrap_err();
        assert!(err.to_string().contains("All elements must be numbers"));

        let bools = Datum::List(vec![Datum::Bool(true), Datum::Bool(false)]);
        assert!(NumericalEntropy::new().compute_entropy(Some(&bools)).is_err());
    }

    #[test]
    fn rejects_non_list() {
        let err = NumericalEntropy::new().compute_entropy(Some(&Datum::from("1 2 3"))).unwrap_err();
        assert!(err.to_string().contains("Input must be a list of numbers or None"));
    }

    #[test]
    fn rejects_non_finite() {
        let err = NumericalEntropy::new().score(Some(&[1.0, f64::NAN][..])).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(NumericalEntropy::new().score(Some(&[f64::INFINITY][..])).is_err());
    }

    #[test]
    fn far_outlier_does_not_explode_bin_count() {
        let mut sample: Vec<f64> = (0..100).map(|i| i as f64 * 1e-9).collect();
        sample.push(1e12);
        let score = NumericalEntropy::new().score(Some(sample.as_slice())).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}
