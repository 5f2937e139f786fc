// entropy-analyzer-stats/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod entropy;
pub mod statistics;
pub mod histogram;
pub mod ngrams;
pub mod tfidf;
pub mod scoring;

/// Common type definitions
pub type EntropyScore = f64;
