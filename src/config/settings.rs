//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Sample sanitization limits
    #[serde(default)]
    pub guards: GuardSettings,

    /// Extra column names not exposed as CLI flags
    #[serde(default)]
    pub columns: ColumnSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (falls back to OPENAI_API_KEY / GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint override (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardSettings {
    /// Per-sample character cap before truncation
    #[serde(default = "default_max_chars_per_sample")]
    pub max_chars_per_sample: usize,

    /// Character budget for the whole sample block of the prompt
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSettings {
    /// Optional identifier column
    #[serde(default = "default_id_column")]
    pub id: String,
}

// Default value functions

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_output_tokens() -> u32 {
    800
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_chars_per_sample() -> usize {
    800
}

fn default_max_prompt_chars() -> usize {
    48_000
}

fn default_id_column() -> String {
    "id".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            max_chars_per_sample: default_max_chars_per_sample(),
            max_prompt_chars: default_max_prompt_chars(),
        }
    }
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            id: default_id_column(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(var) = self.api_key_env_var() {
                if let Ok(key) = std::env::var(var) {
                    if !key.trim().is_empty() {
                        self.llm.api_key = key;
                    }
                }
            }
        }
    }

    /// Environment variable holding the key for the configured provider
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self.llm.provider.to_lowercase().as_str() {
            "openai" => Some("OPENAI_API_KEY"),
            "gemini" => Some("GEMINI_API_KEY"),
            _ => None,
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "feedback-insights", "feedback-insights")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings rendered for display, with the API key masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.llm.api_key.is_empty() {
            copy.llm.api_key = "********".to_string();
        }
        copy
    }
}
