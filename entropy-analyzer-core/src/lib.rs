// entropy-analyzer-core/src/lib.rs
//! # Entropy Analyzer Core Library
//!
//! `entropy-analyzer-core` scores how unpredictable a piece of data is. Five
//! strategies cover different data shapes, each returning a score in
//! `[0.0, 1.0]` where 0.0 means fully predictable:
//!
//! * `text`: Shannon entropy of a string's characters.
//! * `numerical`: entropy of an auto-binned histogram of a list of numbers.
//! * `search`: spread of character n-gram TF-IDF weights across a list of results.
//! * `time`: entropy of the gaps between consecutive ISO-8601 timestamps.
//! * `contextual`: a language-model rating of a string, with `text` as fallback.
//!
//! ## Modules
//!
//! * `strategy`: The `EntropyStrategy` trait, `StrategyKind` tokens and the `Strategy` union.
//! * `strategies`: The five concrete strategies.
//! * `factory`: `EntropyFactory`, the immutable token-to-strategy registry.
//! * `datum`: `Datum`, the dynamically shaped input value.
//! * `config`: YAML configuration for normalization constants and the judge.
//! * `judge`: The `JudgeClient` seam and the default `OpenAiJudge`.
//! * `llm`: Blocking and async chat-completion clients.
//! * `workflow`: A validate/execute/validate run lifecycle and `EntropyWorkflow`.
//! * `headless`: One-call scoring helpers.
//! * `errors`: Error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use entropy_analyzer_core::{Datum, EntropyFactory, EntropyStrategy};
//!
//! let factory = EntropyFactory::global();
//! let text = factory.get(Some("text")).unwrap();
//! let score = text.compute_entropy(Some(&Datum::from("hello world"))).unwrap();
//! assert!(score > 0.0 && score < 1.0);
//!
//! // Absent input always scores zero.
//! assert_eq!(text.compute_entropy(None).unwrap(), 0.0);
//! ```
//!
//! ## Error Handling
//!
//! Input of the wrong shape is rejected with `EntropyError::InvalidInput`.
//! Judge failures (`JudgeError`) never escape the contextual strategy; they are
//! logged and answered with character entropy instead.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod datum;
pub mod errors;
pub mod factory;
pub mod headless;
pub mod judge;
pub mod llm;
pub mod strategies;
pub mod strategy;
pub mod workflow;

pub use config::{merge_config, AnalyzerConfig, JudgeConfig, NormalizationConfig};
pub use datum::Datum;
pub use errors::{EntropyError, JudgeError, LlmError, WorkflowError};
pub use factory::EntropyFactory;
pub use headless::{headless_compute_entropy, headless_compute_entropy_json};
pub use judge::{JudgeClient, JudgeRequest, OpenAiJudge};
pub use llm::{AsyncLlm, ChatInput, ChatResponse, JsonSchemaFormat, Llm, Message, ResponseFormat};
pub use strategies::contextual::ContextualEntropy;
pub use strategies::numerical::NumericalEntropy;
pub use strategies::search::SearchEngineEntropy;
pub use strategies::text::TextEntropy;
pub use strategies::time::TimeEntropy;
pub use strategy::{EntropyStrategy, Strategy, StrategyKind};
pub use workflow::{EntropyReport, EntropyRequest, EntropyWorkflow, Workflow};

pub use entropy_analyzer_stats::scoring::Normalization;
