// entropy-analyzer/src/ui/mod.rs
//! Terminal presentation: theme loading and themed output.

pub mod output_format;
pub mod theme;
