// entropy-analyzer-stats/src/scoring/mod.rs

/// Entropy, in the strategy's unit, that maps to a score of 1.0.
///
/// Chosen empirically; recalibrate for alphabets or domains far from plain text.
pub const DEFAULT_CEILING: f64 = 8.0;

/// Padding added to every bin or interval weight before taking entropy.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Tunable constants that map raw entropy into the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub ceiling: f64,
    pub epsilon: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Normalization {
    /// Maps a raw entropy value to `[0.0, 1.0]` as `min(1.0, raw / ceiling)`.
    ///
    /// Unbounded (or undefined) entropy saturates at 1.0.
    pub fn score(&self, raw: f64) -> f64 {
        clamp_unit(raw / self.ceiling)
    }
}

/// Clamps a value into `[0.0, 1.0]`; NaN maps to 1.0.
pub fn clamp_unit(value: f64) -> f64 {
    value.min(1.0).max(0.0)
}
