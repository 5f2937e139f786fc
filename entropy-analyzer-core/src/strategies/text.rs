// entropy-analyzer-core/src/strategies/text.rs
//! Character-distribution entropy.

use entropy_analyzer_stats::entropy::char_entropy;
use entropy_analyzer_stats::scoring::Normalization;
use log::debug;

use super::expect_text;
use crate::datum::Datum;
use crate::errors::EntropyError;
use crate::strategy::{EntropyStrategy, StrategyKind};

/// Scores a string by the Shannon entropy (in bits) of its characters,
/// divided by the normalization ceiling.
///
/// Characters are Unicode scalar values, so "é" is one symbol whatever its
/// UTF-8 width.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextEntropy {
    normalization: Normalization,
}

impl TextEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalization(normalization: Normalization) -> Self {
        Self { normalization }
    }

    pub fn score(&self, text: Option<&str>) -> f64 {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return 0.0;
        };
        let bits = char_entropy(text);
        debug!("Text entropy: {:.4} bits over {} chars", bits, text.chars().count());
        self.normalization.score(bits)
    }
}

impl EntropyStrategy for TextEntropy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Text
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        let text = expect_text(data)?;
        Ok(self.score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absent_and_empty_score_zero() {
        let s = TextEntropy::new();
        assert_eq!(s.score(None), 0.0);
        assert_eq!(s.score(Some("")), 0.0);
        assert_eq!(s.compute_entropy(None).unwrap(), 0.0);
        assert_eq!(s.compute_entropy(Some(&Datum::Null)).unwrap(), 0.0);
    }

    #[test]
    fn single_symbol_scores_zero() {
        assert_eq!(TextEntropy::new().score(Some("aaaaaaa")), 0.0);
    }

    #[test]
    fn known_values() {
        let s = TextEntropy::new();
        assert!(approx(s.score(Some("ab")), 1.0 / 8.0));
        assert!(approx(s.score(Some("abcd")), 2.0 / 8.0));
        assert!(approx(s.score(Some("aab")), 0.918_295_834_054_489_6 / 8.0));
    }

    #[test]
    fn multibyte_chars_are_single_symbols() {
        assert!(approx(TextEntropy::new().score(Some("éü")), 1.0 / 8.0));
    }

    #[test]
    fn rejects_non_string() {
        let err = TextEntropy::new().compute_entropy(Some(&Datum::Int(123))).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Input must be a string or None"));
    }

    #[test]
    fn custom_ceiling_rescales() {
        let s = TextEntropy::with_normalization(Normalization { ceiling: 2.0, ..Normalization::default() });
        assert!(approx(s.score(Some("ab")), 0.5));
    }
}
