// entropy-analyzer-core/src/strategies/time.rs
//! Inter-arrival entropy of a timestamp sequence.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use entropy_analyzer_stats::entropy::{shannon_entropy, LogBase};
use entropy_analyzer_stats::scoring::Normalization;
use entropy_analyzer_stats::statistics::min_max;
use log::debug;

use super::{expect_list, expect_strings};
use crate::datum::Datum;
use crate::errors::EntropyError;
use crate::strategy::{EntropyStrategy, StrategyKind};

/// Accepted layouts carrying an explicit UTC offset (after RFC 3339 itself).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Accepted layouts without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Scores a sequence of ISO-8601 timestamps by how irregular the gaps between
/// consecutive entries are.
///
/// Gaps are taken in input order (no sorting), divided by their range, padded
/// with epsilon and treated as a distribution whose entropy in nats is divided
/// by the normalization ceiling. Perfectly regular gaps score 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeEntropy {
    normalization: Normalization,
}

impl TimeEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalization(normalization: Normalization) -> Self {
        Self { normalization }
    }

    pub fn score<S: AsRef<str>>(&self, timestamps: Option<&[S]>) -> Result<f64, EntropyError> {
        let Some(timestamps) = timestamps.filter(|t| !t.is_empty()) else {
            return Ok(0.0);
        };
        let seconds = timestamps
            .iter()
            .map(|ts| parse_timestamp(ts.as_ref()))
            .collect::<Result<Vec<f64>, _>>()?;
        if seconds.len() < 2 {
            return Ok(0.0);
        }

        let intervals: Vec<f64> = seconds.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let Some((shortest, longest)) = min_max(&intervals) else {
            return Ok(0.0);
        };
        let range = longest - shortest;
        if range == 0.0 {
            debug!("Time entropy: {} identical gaps", intervals.len());
            return Ok(0.0);
        }

        let weights: Vec<f64> = intervals
            .iter()
            .map(|gap| gap / range + self.normalization.epsilon)
            .collect();
        let nats = shannon_entropy(&weights, LogBase::E);
        debug!("Time entropy: {:.4} nats over {} gaps (range {}s)", nats, intervals.len(), range);
        Ok(self.normalization.score(nats))
    }
}

impl EntropyStrategy for TimeEntropy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Time
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        let Some(items) = expect_list(data, "list of timestamps")? else {
            return Ok(0.0);
        };
        let timestamps = expect_strings(items, "timestamp strings")?;
        self.score(Some(timestamps.as_slice()))
    }
}

/// Parses an ISO-8601 timestamp into seconds since the Unix epoch.
///
/// Accepts RFC 3339, the same layout with a space separator or without seconds,
/// and a bare date (midnight). Values without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Result<f64, EntropyError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(epoch_seconds(&dt));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(epoch_seconds(&dt));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(epoch_seconds(&Utc.from_utc_datetime(&naive)));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(epoch_seconds(&Utc.from_utc_datetime(&midnight)));
        }
    }
    Err(EntropyError::invalid(format!("Invalid timestamp format: {}", value)))
}

fn epoch_seconds<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}
