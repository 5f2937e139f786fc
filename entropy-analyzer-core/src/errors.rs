//! errors.rs - Custom error types for the entropy-analyzer-core library.
//!
//! Two classes of failure exist. `EntropyError::InvalidInput` is raised when
//! data has the wrong shape for a strategy and is always surfaced to the caller.
//! `JudgeError` covers everything that can go wrong talking to the external
//! language-model judge; it is recovered locally by the contextual strategy and
//! never escapes `compute_entropy`.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Errors surfaced by strategies, the factory and configuration loading.
///
/// `#[non_exhaustive]` keeps adding variants a non-breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EntropyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}

impl EntropyError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EntropyError::InvalidInput(msg.into())
    }

    /// True for the shape/type rejection class.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EntropyError::InvalidInput(_))
    }
}

/// Transient failures of the external judge call.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum JudgeError {
    #[error("Judge credentials missing: environment variable '{0}' is not set")]
    MissingCredentials(String),

    #[error("Judge transport failure: {0}")]
    Transport(String),

    #[error("Judge request timed out")]
    Timeout,

    #[error("Judge returned HTTP status {0}")]
    Status(u16),

    #[error("Judge returned a malformed response: {0}")]
    MalformedResponse(String),

    /// The blocking client was asked to run on a thread driven by an async runtime.
    #[error("Blocking judge cannot run inside an async runtime; use AsyncLlm from async code")]
    AsyncContext,
}

/// Errors raised by the chat-completion facade.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LlmError {
    /// The request was rejected before it was sent.
    #[error("Error in chat input: {0}")]
    Validation(String),

    #[error("Failed to generate chat completion: request timed out")]
    Timeout,

    #[error("Failed to generate chat completion: HTTP status {0}")]
    Status(u16),

    /// The request was sent but no usable response came back.
    #[error("Failed to generate chat completion: {0}")]
    Execution(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if let Some(status) = err.status() {
            LlmError::Status(status.as_u16())
        } else {
            LlmError::Execution(err.to_string())
        }
    }
}

impl From<LlmError> for JudgeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => JudgeError::Timeout,
            LlmError::Status(code) => JudgeError::Status(code),
            LlmError::Validation(msg) => JudgeError::Transport(format!("request rejected before sending: {}", msg)),
            LlmError::Execution(msg) => JudgeError::Transport(msg),
        }
    }
}

/// Errors surfaced by a workflow run, one per lifecycle stage.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WorkflowError {
    /// Input or output failed its workflow's checks.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Workflow execution failed: {0}")]
    Execution(String),

    #[error("Workflow failed unexpectedly: {0}")]
    Unexpected(String),
}
