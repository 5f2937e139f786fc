//! Equal-width histograms with a data-driven bin count.
//!
//! The bin width follows the "auto" rule: the smaller of the Freedman-Diaconis
//! and Sturges estimates, falling back to Sturges when the inter-quartile range
//! is zero. Data with no spread gets a single unit-wide bin centred on the value.

extern crate alloc;
use alloc::vec::Vec;
use libm::{ceil, cbrt, floor, log2};

use crate::statistics::{min_max, percentile_sorted};

/// Upper bound on the bin count chosen by [`Histogram::auto`].
///
/// A single far outlier next to a tight cluster can ask for billions of bins.
pub const MAX_AUTO_BINS: usize = 1 << 20;

/// An equal-width histogram: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Sturges bin width: `ptp / (log2(n) + 1)`.
pub fn sturges_width(values: &[f64]) -> f64 {
    let Some((lo, hi)) = min_max(values) else { return 0.0 };
    (hi - lo) / (log2(values.len() as f64) + 1.0)
}

/// Freedman-Diaconis bin width: `2 * IQR * n^(-1/3)`.
pub fn freedman_diaconis_width(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let iqr = percentile_sorted(&sorted, 75.0) - percentile_sorted(&sorted, 25.0);
    2.0 * iqr / cbrt(values.len() as f64)
}

/// The "auto" bin width used by [`Histogram::auto`].
pub fn auto_width(values: &[f64]) -> f64 {
    let fd = freedman_diaconis_width(values);
    let sturges = sturges_width(values);
    if fd > 0.0 { fd.min(sturges) } else { sturges }
}

/// Whether `max - min` of the values is representable. Finite values such as
/// `[-1e308, 1e308]` still overflow and cannot be binned.
pub fn span_is_finite(values: &[f64]) -> bool {
    match min_max(values) {
        Some((lo, hi)) => (hi - lo).is_finite(),
        None => true,
    }
}

impl Histogram {
    /// Builds a histogram over finite values with an automatically chosen bin count.
    ///
    /// Returns an empty histogram (no bins) for empty input, and for input whose
    /// span `max - min` overflows to infinity (see [`span_is_finite`]).
    pub fn auto(values: &[f64]) -> Self {
        let Some((mut first, mut last)) = min_max(values) else {
            return Self { edges: Vec::new(), counts: Vec::new() };
        };
        if !(last - first).is_finite() {
            return Self { edges: Vec::new(), counts: Vec::new() };
        }

        if first == last {
            first -= 0.5;
            last += 0.5;
        }

        let width = auto_width(values);
        let bins = if width > 0.0 {
            (ceil((last - first) / width) as usize).clamp(1, MAX_AUTO_BINS)
        } else {
            1
        };

        Self::with_range(values, first, last, bins)
    }

    /// Builds a histogram with `bins` equal-width bins over `[first, last]`.
    ///
    /// The last bin is closed on the right; values outside the range are ignored.
    pub fn with_range(values: &[f64], first: f64, last: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let span = last - first;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| first + span * (i as f64 / bins as f64))
            .collect();
        let mut counts = alloc::vec![0usize; bins];

        for &value in values {
            if value < first || value > last {
                continue;
            }
            let mut index = floor((value - first) / span * bins as f64) as usize;
            if index >= bins {
                index = bins - 1;
            }
            // Floating point can land a value one bin off its edges.
            if index > 0 && value < edges[index] {
                index -= 1;
            } else if index + 1 < bins && value >= edges[index + 1] {
                index += 1;
            }
            counts[index] += 1;
        }

        Self { edges, counts }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Probability densities per bin: `count / (total * bin_width)`.
    ///
    /// The densities integrate to one over the histogram range. All zeros when
    /// no value fell inside the range.
    pub fn densities(&self) -> Vec<f64> {
        let total: usize = self.counts.iter().sum();
        if total == 0 {
            return alloc::vec![0.0; self.counts.len()];
        }
        self.counts.iter()
            .zip(self.edges.windows(2))
            .map(|(&count, edge)| count as f64 / (total as f64 * (edge[1] - edge[0])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_overflowing_span_has_no_bins() {
        let values = [-1e308, 1e308];
        assert!(!span_is_finite(&values));
        assert!(span_is_finite(&[-1.0, 1.0]));
        assert!(span_is_finite(&[]));
        assert_eq!(Histogram::auto(&values).bin_count(), 0);
    }

    #[test]
    fn test_constant_values_use_single_unit_bin() {
        let hist = Histogram::auto(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(hist.bin_count(), 1);
        assert_eq!(hist.edges, vec![0.5, 1.5]);
        assert_eq!(hist.counts, vec![5]);
        assert!((hist.densities()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_auto_bins_for_small_range() {
        // Sturges width 4 / (log2(5) + 1) ~ 1.204 beats FD width ~ 2.339: ceil(4 / 1.204) = 4 bins.
        let hist = Histogram::auto(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(hist.bin_count(), 4);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_last_bin_is_closed() {
        let hist = Histogram::with_range(&[0.0, 10.0], 0.0, 10.0, 5);
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_densities_integrate_to_one() {
        let hist = Histogram::auto(&[0.1, 0.4, 2.5, 3.3, 9.0, 9.1, 12.0]);
        let area: f64 = hist.densities().iter()
            .zip(hist.edges.windows(2))
            .map(|(d, e)| d * (e[1] - e[0]))
            .sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let hist = Histogram::auto(&[]);
        assert_eq!(hist.bin_count(), 0);
        assert!(hist.densities().is_empty());
    }
}
