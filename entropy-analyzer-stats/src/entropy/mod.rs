// entropy-analyzer-stats/src/entropy/mod.rs
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use libm::{log, log2};

/// Unit in which an entropy value is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBase {
    /// Bits (log base 2).
    Two,
    /// Nats (natural logarithm).
    E,
}

impl LogBase {
    fn apply(self, p: f64) -> f64 {
        match self {
            LogBase::Two => log2(p),
            LogBase::E => log(p),
        }
    }
}

/// Calculates the Shannon entropy of a frequency table.
///
/// Zero counts are skipped. An empty or all-zero table has no information and
/// yields `0.0`.
pub fn entropy_from_counts(counts: &[usize], base: LogBase) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let mut entropy = 0.0;

    for &count in counts {
        if count > 0 {
            let p = count as f64 / total;
            entropy -= p * base.apply(p);
        }
    }

    entropy
}

/// Calculates the Shannon entropy of a string's Unicode code points, in bits per symbol.
pub fn char_entropy(text: &str) -> f64 {
    let mut frequencies: BTreeMap<char, usize> = BTreeMap::new();
    for c in text.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
    }

    let counts: Vec<usize> = frequencies.into_values().collect();
    entropy_from_counts(&counts, LogBase::Two)
}

/// Calculates the Shannon entropy of an arbitrary same-signed weight vector.
///
/// The weights are scaled to sum to one before the entropy is taken, so the
/// vector does not need to be a probability distribution. Zero weights
/// contribute nothing.
///
/// The weights are divided by their sum whatever its sign, so an all-negative
/// vector describes the same distribution as its negation. A vector that still
/// cannot be scaled into a distribution (mixed signs, or a total that is zero
/// or not finite) reports unbounded entropy (`f64::INFINITY`). Callers
/// normalizing into `[0, 1]` therefore saturate at the upper bound.
pub fn shannon_entropy(weights: &[f64], base: LogBase) -> f64 {
    if weights.is_empty() {
        return 0.0;
    }

    let total: f64 = weights.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return f64::INFINITY;
    }

    let mut entropy = 0.0;
    for &weight in weights {
        let p = weight / total;
        if p.is_nan() || p < 0.0 {
            return f64::INFINITY;
        }
        if p > 0.0 {
            entropy -= p * base.apply(p);
        }
    }

    entropy
}
