// entropy-analyzer-core/src/strategies/search.rs
//! Diversity of a set of search results.

use entropy_analyzer_stats::scoring::clamp_unit;
use entropy_analyzer_stats::tfidf::TfIdfMatrix;
use log::debug;

use super::{expect_list, expect_strings};
use crate::datum::Datum;
use crate::errors::EntropyError;
use crate::strategy::{EntropyStrategy, StrategyKind};

/// Shortest and longest character n-gram used as a feature.
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (2, 3);

/// Scores a list of result strings by how unevenly their character n-gram
/// TF-IDF weights are spread across the results.
///
/// Word-bounded character n-grams are weighted with smoothed TF-IDF, each row
/// is L2-normalized, and the score is the mean over features of the population
/// standard deviation of that feature's column. Identical results score 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchEngineEntropy {
    min_n: usize,
    max_n: usize,
}

impl Default for SearchEngineEntropy {
    fn default() -> Self {
        Self {
            min_n: DEFAULT_NGRAM_RANGE.0,
            max_n: DEFAULT_NGRAM_RANGE.1,
        }
    }
}

impl SearchEngineEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses n-grams of `min_n..=max_n` characters. A zero or inverted range
    /// falls back to the default.
    pub fn with_ngram_range(min_n: usize, max_n: usize) -> Self {
        if min_n == 0 || min_n > max_n {
            return Self::default();
        }
        Self { min_n, max_n }
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }

    pub fn score<S: AsRef<str>>(&self, results: Option<&[S]>) -> f64 {
        let Some(results) = results.filter(|r| !r.is_empty()) else {
            return 0.0;
        };
        let first = results[0].as_ref();
        if results.iter().all(|r| r.as_ref() == first) {
            return 0.0;
        }

        let matrix = TfIdfMatrix::fit_char_wb(results, self.min_n, self.max_n);
        match matrix.mean_column_std_dev() {
            Some(spread) => {
                debug!(
                    "Search entropy: mean spread {:.4} over {} features, {} results",
                    spread,
                    matrix.feature_count(),
                    results.len()
                );
                clamp_unit(spread)
            }
            None => {
                debug!("Search entropy: results produced no n-gram features");
                0.0
            }
        }
    }
}

impl EntropyStrategy for SearchEngineEntropy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Search
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        let Some(items) = expect_list(data, "list of strings")? else {
            return Ok(0.0);
        };
        let results = expect_strings(items, "strings")?;
        Ok(self.score(Some(results.as_slice())))
    }
}
