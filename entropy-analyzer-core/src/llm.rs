// entropy-analyzer-core/src/llm.rs
//! A thin facade over OpenAI-compatible chat-completion endpoints.
//!
//! [`Llm`] is the blocking client used by the contextual strategy; [`AsyncLlm`]
//! offers the same surface to callers already running on a tokio runtime. Both
//! validate a [`ChatInput`] before anything is sent, POST it to
//! `{base_url}/chat/completions` with bearer authentication, and decode the
//! reply into a [`ChatResponse`]. The `*_structured` variants additionally ask
//! for a [`ResponseFormat`] and decode the reply text into a caller type.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::LlmError;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// The JSON Schema a structured reply must follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
    #[serde(default)]
    pub strict: bool,
}

/// Requested shape of the reply text, sent as `response_format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Any JSON object.
    JsonObject,
    /// JSON matching a named schema.
    JsonSchema { json_schema: JsonSchemaFormat },
}

impl ResponseFormat {
    /// A strict schema-constrained format.
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: name.into(),
                schema,
                strict: true,
            },
        }
    }
}

/// A chat-completion request. Unset optional parameters are omitted from the
/// request body so the server defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInput {
    pub messages: Vec<Message>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatInput {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: model.into(),
            frequency_penalty: None,
            presence_penalty: None,
            max_tokens: None,
            n: None,
            temperature: None,
            top_p: None,
            stop: None,
            user: None,
            seed: None,
            response_format: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Checks the request against the documented parameter ranges.
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::Validation("model must not be empty".to_string()));
        }
        if self.messages.is_empty() {
            return Err(LlmError::Validation("messages must not be empty".to_string()));
        }
        check_range("frequency_penalty", self.frequency_penalty, -2.0, 2.0)?;
        check_range("presence_penalty", self.presence_penalty, -2.0, 2.0)?;
        check_range("temperature", self.temperature, 0.0, 2.0)?;
        check_range("top_p", self.top_p, 0.0, 1.0)?;
        if self.max_tokens == Some(0) {
            return Err(LlmError::Validation("max_tokens must be at least 1".to_string()));
        }
        if self.n == Some(0) {
            return Err(LlmError::Validation("n must be at least 1".to_string()));
        }
        if let Some(ResponseFormat::JsonSchema { json_schema }) = &self.response_format {
            if json_schema.name.trim().is_empty() {
                return Err(LlmError::Validation("response_format schema name must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

fn check_range(name: &str, value: Option<f64>, low: f64, high: f64) -> Result<(), LlmError> {
    match value {
        Some(v) if !(low..=high).contains(&v) => Err(LlmError::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, low, high, v
        ))),
        _ => Ok(()),
    }
}

/// The message inside a completion choice. Content may be absent (tool calls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A decoded chat-completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub usage: Usage,
}

impl ChatResponse {
    /// Text of the first choice, if the server returned any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Decodes the first choice's text as `T`.
fn parse_structured<T: DeserializeOwned>(response: &ChatResponse) -> Result<T, LlmError> {
    let content = response
        .first_content()
        .ok_or_else(|| LlmError::Execution("structured response contained no message content".to_string()))?;
    serde_json::from_str(content)
        .map_err(|e| LlmError::Execution(format!("structured response does not match the requested format: {}", e)))
}

fn log_request(verbose: bool, input: &ChatInput) {
    if verbose {
        info!("Generating chat completion with model: {}", input.model);
    } else {
        debug!("Generating chat completion with model: {}", input.model);
    }
}

fn log_response(verbose: bool, response: &ChatResponse) {
    if verbose {
        info!("Successfully generated response: {:?}", response);
    } else {
        debug!("Chat completion returned {} choice(s)", response.choices.len());
    }
}

/// Blocking chat-completion client.
#[derive(Debug, Clone)]
pub struct Llm {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    verbose: bool,
}

impl Llm {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Execution(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            verbose: false,
        })
    }

    /// Logs requests and responses at `info` instead of `debug`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn generate_response(&self, input: &ChatInput) -> Result<ChatResponse, LlmError> {
        input.validate()?;
        log_request(self.verbose, input);

        let response = self
            .client
            .post(completions_url(&self.base_url))
            .bearer_auth(&self.api_key)
            .json(input)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|e| LlmError::Execution(format!("undecodable response body: {}", e)))?;
        log_response(self.verbose, &body);
        Ok(body)
    }

    /// Requests a reply in `format` and decodes its text as `T`.
    pub fn generate_response_structured<T: DeserializeOwned>(
        &self,
        input: &ChatInput,
        format: ResponseFormat,
    ) -> Result<T, LlmError> {
        let input = input.clone().with_response_format(format);
        let response = self.generate_response(&input)?;
        parse_structured(&response)
    }
}

/// Asynchronous chat-completion client for tokio callers.
#[derive(Debug, Clone)]
pub struct AsyncLlm {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    verbose: bool,
}

impl AsyncLlm {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Execution(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub async fn generate_response(&self, input: &ChatInput) -> Result<ChatResponse, LlmError> {
        input.validate()?;
        log_request(self.verbose, input);

        let response = self
            .client
            .post(completions_url(&self.base_url))
            .bearer_auth(&self.api_key)
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Execution(format!("undecodable response body: {}", e)))?;
        log_response(self.verbose, &body);
        Ok(body)
    }

    /// Requests a reply in `format` and decodes its text as `T`.
    pub async fn generate_response_structured<T: DeserializeOwned>(
        &self,
        input: &ChatInput,
        format: ResponseFormat,
    ) -> Result<T, LlmError> {
        let input = input.clone().with_response_format(format);
        let response = self.generate_response(&input).await?;
        parse_structured(&response)
    }
}
