//! Dense TF-IDF matrices over character n-grams.
//!
//! Term weights are raw counts multiplied by the smoothed inverse document
//! frequency `ln((1 + N) / (1 + df)) + 1`; each document row is then scaled to
//! unit L2 norm.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use libm::{log, sqrt};

use crate::ngrams::char_wb_ngrams;
use crate::statistics::compute_stats;

/// A fitted documents-by-features TF-IDF matrix.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    /// Fits a matrix over `char_wb` n-grams of sizes `min_n..=max_n`.
    pub fn fit_char_wb<S: AsRef<str>>(documents: &[S], min_n: usize, max_n: usize) -> Self {
        let term_counts: Vec<BTreeMap<String, usize>> = documents.iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for gram in char_wb_ngrams(doc.as_ref(), min_n, max_n) {
                    *counts.entry(gram).or_insert(0usize) += 1;
                }
                counts
            })
            .collect();

        // Sorted vocabulary with document frequencies.
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let index: BTreeMap<&str, usize> = doc_freq.keys()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();
        let idf: Vec<f64> = doc_freq.values()
            .map(|&df| log((1.0 + n_docs) / (1.0 + df as f64)) + 1.0)
            .collect();

        let rows = term_counts.iter()
            .map(|counts| {
                let mut row = alloc::vec![0.0; idf.len()];
                for (term, &count) in counts {
                    let j = index[term.as_str()];
                    row[j] = count as f64 * idf[j];
                }
                let norm = sqrt(row.iter().map(|w| w * w).sum::<f64>());
                if norm > 0.0 {
                    row.iter_mut().for_each(|w| *w /= norm);
                }
                row
            })
            .collect();

        Self {
            vocabulary: doc_freq.into_keys().collect(),
            rows,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn feature_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Population standard deviation of each feature column across documents.
    pub fn column_std_devs(&self) -> Vec<f64> {
        let mut column = Vec::with_capacity(self.rows.len());
        (0..self.feature_count())
            .map(|j| {
                column.clear();
                column.extend(self.rows.iter().map(|row| row[j]));
                compute_stats(&column).std_dev
            })
            .collect()
    }

    /// Mean of [`Self::column_std_devs`], or `None` when there are no features.
    pub fn mean_column_std_dev(&self) -> Option<f64> {
        let devs = self.column_std_devs();
        if devs.is_empty() {
            return None;
        }
        Some(devs.iter().sum::<f64>() / devs.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_have_zero_dispersion() {
        let matrix = TfIdfMatrix::fit_char_wb(&["same text", "same text"], 2, 3);
        assert!(matrix.feature_count() > 0);
        let mean = matrix.mean_column_std_dev().unwrap();
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = TfIdfMatrix::fit_char_wb(&["alpha", "beta distinct"], 2, 3);
        for row in matrix.rows() {
            let norm: f64 = row.iter().map(|w| w * w).sum::<f64>();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        // "ab" appears in both documents so it must weigh less than "xy" inside doc 1.
        let matrix = TfIdfMatrix::fit_char_wb(&["ab", "ab xy"], 2, 2);
        let vocab = matrix.vocabulary();
        let ab = vocab.iter().position(|t| t == "ab").unwrap();
        let xy = vocab.iter().position(|t| t == "xy").unwrap();
        let row = &matrix.rows()[1];
        assert!(row[ab] < row[xy]);
    }

    #[test]
    fn test_no_features_for_blank_documents() {
        let matrix = TfIdfMatrix::fit_char_wb(&[" ", "\t"], 2, 3);
        assert_eq!(matrix.feature_count(), 0);
        assert_eq!(matrix.mean_column_std_dev(), None);
    }
}
