use libm::{floor, sqrt};

/// Summary statistics for a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// The arithmetic mean of the values.
    pub mean: f64,
    /// The population standard deviation (ddof = 0).
    pub std_dev: f64,
}

/// Calculates mean and population standard deviation for a slice of values.
///
/// The TF-IDF dispersion score takes this per feature column, so the
/// deviation divides by `n`, not `n - 1`.
pub fn compute_stats(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats { mean: 0.0, std_dev: 0.0 };
    }

    let len = values.len() as f64;

    let mean = values.iter().sum::<f64>() / len;

    let variance = values.iter()
        .map(|value| {
            let diff = mean - value;
            diff * diff
        })
        .sum::<f64>() / len;

    SummaryStats {
        mean,
        std_dev: sqrt(variance),
    }
}

/// Returns the `q`-th percentile (0..=100) of an ascending-sorted slice.
///
/// Uses linear interpolation between the two closest ranks. Returns `0.0` for
/// an empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = floor(rank) as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Returns `(min, max)` of a slice, or `None` when it is empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = values.split_first()?;
    Some(rest.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::vec;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_compute_stats_identical_values() {
        let stats = compute_stats(&[4.0, 4.0, 4.0]);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_compute_stats_simple_range() {
        // Mean 5.0, variance 32/8 = 4.0, std dev 2.0
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = compute_stats(&values);

        assert!((stats.mean - 5.0).abs() < EPSILON);
        assert!((stats.std_dev - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((percentile_sorted(&sorted, 25.0) - 2.0).abs() < EPSILON);
        assert!((percentile_sorted(&sorted, 75.0) - 4.0).abs() < EPSILON);
        assert!((percentile_sorted(&sorted, 50.0) - 3.0).abs() < EPSILON);

        let even = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile_sorted(&even, 25.0) - 1.75).abs() < EPSILON);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
    }
}
