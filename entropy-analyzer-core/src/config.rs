//! Configuration management for `entropy-analyzer-core`.
//!
//! This module defines the tunable normalization constants and the settings of
//! the language-model judge. It handles YAML deserialization and provides
//! utilities for loading, merging, and validating configurations.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use entropy_analyzer_stats::scoring::{Normalization, DEFAULT_CEILING, DEFAULT_EPSILON};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name searched for in the standard configuration locations.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Normalization constants as they appear in a config file.
///
/// Every field is optional so a user file can override a single value.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NormalizationConfig {
    /// Entropy that maps to a score of 1.0 (default: 8.0).
    pub ceiling: Option<f64>,
    /// Padding added to histogram bins and interval weights (default: 1e-10).
    pub epsilon: Option<f64>,
}

impl NormalizationConfig {
    pub fn resolve(&self) -> Normalization {
        Normalization {
            ceiling: self.ceiling.unwrap_or(DEFAULT_CEILING),
            epsilon: self.epsilon.unwrap_or(DEFAULT_EPSILON),
        }
    }
}

/// Settings for the external language-model judge.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JudgeConfig {
    /// Chat model identifier (default: "gpt-3.5-turbo").
    pub model: Option<String>,
    /// Base URL of an OpenAI-compatible API (default: "https://api.openai.com/v1").
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key (default: "OPENAI_API_KEY").
    pub api_key_env: Option<String>,
    /// Request timeout in seconds (default: 10).
    pub timeout_secs: Option<u64>,
    /// System instruction sent with every rating request.
    pub system_prompt: Option<String>,
}

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SYSTEM_PROMPT: &str = "Rate text unpredictability from 0-10";

impl JudgeConfig {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

/// Top-level configuration for the analyzer.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub normalization: NormalizationConfig,
    pub judge: JudgeConfig,
}

impl AnalyzerConfig {
    /// Loads a configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AnalyzerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the built-in defaults from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: AnalyzerConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;
        Ok(config)
    }

    /// Standard locations searched for a user configuration, in priority order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let paths = vec![
            Some(PathBuf::from("./entropy-analyzer.yaml")),
            dirs::config_dir().map(|p| p.join("entropy-analyzer").join(CONFIG_FILE_NAME)),
            dirs::home_dir().map(|p| p.join(".entropy-analyzer").join(CONFIG_FILE_NAME)),
        ];

        paths.into_iter().flatten().collect()
    }

    /// Loads the first user configuration found in [`Self::candidate_paths`], if any.
    pub fn discover() -> Result<Option<Self>> {
        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!("Discovered user configuration at {}", path.display());
                Self::load_from_file(&path).map(Some)
            }
            None => {
                debug!("No user configuration found in standard locations.");
                Ok(None)
            }
        }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization.resolve()
    }

    /// Checks that every set value is usable.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(ceiling) = self.normalization.ceiling {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                errors.push(format!("normalization.ceiling must be a positive finite number, got {}", ceiling));
            }
        }
        if let Some(epsilon) = self.normalization.epsilon {
            if !(epsilon.is_finite() && epsilon >= 0.0) {
                errors.push(format!("normalization.epsilon must be a non-negative finite number, got {}", epsilon));
            }
        }
        if self.judge.timeout_secs == Some(0) {
            errors.push("judge.timeout_secs must be greater than zero".to_string());
        }
        if matches!(self.judge.model.as_deref(), Some("")) {
            errors.push("judge.model must not be empty".to_string());
        }
        if matches!(self.judge.base_url.as_deref(), Some("")) {
            errors.push("judge.base_url must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Merges a user configuration over the defaults; any value the user sets wins.
pub fn merge_config(default_config: AnalyzerConfig, user_config: Option<AnalyzerConfig>) -> AnalyzerConfig {
    let Some(user) = user_config else {
        debug!("No user configuration provided; using defaults.");
        return default_config;
    };

    let mut merged = default_config;

    if let Some(ceiling) = user.normalization.ceiling {
        debug!("Overriding normalization ceiling with user value: {}", ceiling);
        merged.normalization.ceiling = Some(ceiling);
    }
    if let Some(epsilon) = user.normalization.epsilon {
        debug!("Overriding normalization epsilon with user value: {}", epsilon);
        merged.normalization.epsilon = Some(epsilon);
    }

    let judge = user.judge;
    if judge.model.is_some() {
        merged.judge.model = judge.model;
    }
    if judge.base_url.is_some() {
        merged.judge.base_url = judge.base_url;
    }
    if judge.api_key_env.is_some() {
        merged.judge.api_key_env = judge.api_key_env;
    }
    if judge.timeout_secs.is_some() {
        merged.judge.timeout_secs = judge.timeout_secs;
    }
    if judge.system_prompt.is_some() {
        merged.judge.system_prompt = judge.system_prompt;
    }

    merged
}
