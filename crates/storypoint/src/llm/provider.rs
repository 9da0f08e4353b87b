//! LLM provider trait and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Models a caller may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeminiModel {
    #[default]
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
    #[serde(rename = "gemini-pro")]
    GeminiPro,
    #[serde(rename = "gemini-1.0-pro")]
    Gemini10Pro,
}

impl GeminiModel {
    /// Every allowed model, default first.
    pub const ALL: [GeminiModel; 5] = [
        GeminiModel::Gemini15Flash,
        GeminiModel::Gemini25Flash,
        GeminiModel::Gemini15Pro,
        GeminiModel::GeminiPro,
        GeminiModel::Gemini10Pro,
    ];

    /// Identifier used in API paths.
    pub fn as_str(self) -> &'static str {
        match self {
            GeminiModel::Gemini15Flash => "gemini-1.5-flash",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini15Pro => "gemini-1.5-pro",
            GeminiModel::GeminiPro => "gemini-pro",
            GeminiModel::Gemini10Pro => "gemini-1.0-pro",
        }
    }
}

impl FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        GeminiModel::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                let allowed: Vec<&str> = GeminiModel::ALL.iter().map(|m| m.as_str()).collect();
                format!("Unknown model: {}. Use one of: {}.", s, allowed.join(", "))
            })
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for LLM providers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmConfig {
    /// Model to use.
    pub model: GeminiModel,

    /// Sampling temperature; the service default when unset.
    pub temperature: Option<f64>,

    /// Response length cap; the service default when unset.
    pub max_output_tokens: Option<u32>,
}

impl LlmConfig {
    pub fn with_model(model: GeminiModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can
/// serve web requests handled on different threads.
pub trait LlmProvider: Send + Sync {
    /// Send `prompt` and return the model's free-text answer unchanged.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
