// entropy-analyzer-core/src/judge.rs
//! The language-model judge used by the contextual strategy.
//!
//! A [`JudgeClient`] turns a [`JudgeRequest`] into a short text reply. The
//! default implementation, [`OpenAiJudge`], sends one chat completion through
//! the blocking [`Llm`] facade. Tests and embedders can inject their own client.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::env;
use std::fmt;

use crate::config::JudgeConfig;
use crate::errors::JudgeError;
use crate::llm::{ChatInput, Llm, Message};

/// Highest rating the judge is asked for.
pub const MAX_RATING: f64 = 10.0;

/// One rating request: a system instruction, the text to rate, and a token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

impl JudgeRequest {
    /// A request for a single-token 0-10 rating of `text`.
    pub fn rating(system: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: text.into(),
            max_tokens: 1,
        }
    }
}

/// Anything that can answer a [`JudgeRequest`].
pub trait JudgeClient: Send + Sync {
    /// Returns the raw reply text.
    fn complete(&self, request: &JudgeRequest) -> Result<String, JudgeError>;
}

/// Parses a judge reply as a 0-10 rating and scales it into `[0.0, 1.0]`.
pub fn parse_rating(reply: &str) -> Result<f64, JudgeError> {
    let trimmed = reply.trim();
    let rating: f64 = trimmed
        .parse()
        .map_err(|_| JudgeError::MalformedResponse(format!("expected a number, got {:?}", trimmed)))?;
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(JudgeError::MalformedResponse(format!(
            "rating {} is outside 0-{}",
            rating, MAX_RATING
        )));
    }
    Ok(rating / MAX_RATING)
}

/// Judge backed by an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiJudge {
    llm: Llm,
    model: String,
}

impl OpenAiJudge {
    pub fn new(config: &JudgeConfig, api_key: impl Into<String>) -> Result<Self, JudgeError> {
        let llm = Llm::new(config.base_url(), api_key, config.timeout())?;
        Ok(Self {
            llm,
            model: config.model().to_string(),
        })
    }

    /// Builds a judge, reading the API key from the configured environment variable.
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let key_var = config.api_key_env();
        let api_key = env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| JudgeError::MissingCredentials(key_var.to_string()))?;
        Self::new(config, api_key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for OpenAiJudge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiJudge")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl JudgeClient for OpenAiJudge {
    fn complete(&self, request: &JudgeRequest) -> Result<String, JudgeError> {
        let input = ChatInput::new(
            self.model.clone(),
            vec![Message::system(request.system.clone()), Message::user(request.user.clone())],
        )
        .with_max_tokens(request.max_tokens);

        let response = self.llm.generate_response(&input)?;
        let content = response
            .first_content()
            .ok_or_else(|| JudgeError::MalformedResponse("response contained no message content".to_string()))?;
        debug!("Judge replied {:?}", content);
        Ok(content.to_string())
    }
}
