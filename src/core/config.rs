use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const DEFAULT_OLLAMA_API_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3:1b";
pub const DEFAULT_MAX_HISTORY: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the Ollama server, without the `/api/chat` suffix
    pub ollama_api_url: String,
    /// Model every chat turn is sent to unless the caller picks an
    /// allowed alternative
    pub model: String,
    pub allowed_models: Vec<String>,
    pub max_history: usize,
    pub request_timeout: Duration,
    pub require_auth: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_api_url: DEFAULT_OLLAMA_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            allowed_models: vec![],
            max_history: DEFAULT_MAX_HISTORY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            require_auth: false,
        }
    }
}

impl AppConfig {
    /// Build the config from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let ollama_api_url = env::var("OLLAMA_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.ollama_api_url);
        let model = env::var("OLLAMA_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.model);
        let allowed_models = env::var("GATEWAY_ALLOWED_MODELS")
            .map(|s| parse_model_list(&s))
            .unwrap_or_default();

        let max_history = match env::var("GATEWAY_MAX_HISTORY") {
            Ok(val) => val
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid GATEWAY_MAX_HISTORY: {val}"))?,
            Err(_) => defaults.max_history,
        };
        if max_history == 0 {
            bail!("GATEWAY_MAX_HISTORY must be at least 1");
        }

        let timeout_secs = match env::var("OLLAMA_TIMEOUT_SECS") {
            Ok(val) => val
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid OLLAMA_TIMEOUT_SECS: {val}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("OLLAMA_TIMEOUT_SECS must be at least 1");
        }

        let require_auth = match env::var("GATEWAY_REQUIRE_AUTH") {
            Ok(val) => val
                .trim()
                .parse::<bool>()
                .with_context(|| format!("Invalid GATEWAY_REQUIRE_AUTH: {val}"))?,
            Err(_) => defaults.require_auth,
        };

        Ok(Self {
            ollama_api_url,
            model,
            allowed_models,
            max_history,
            request_timeout: Duration::from_secs(timeout_secs),
            require_auth,
        })
    }

    /// Resolve the model a chat turn should use. `None` means the
    /// requested model is not one callers are allowed to select.
    pub fn resolve_model(&self, requested: Option<&str>) -> Option<String> {
        match requested.map(str::trim).filter(|m| !m.is_empty()) {
            None => Some(self.model.clone()),
            Some(m) if m == self.model || self.allowed_models.iter().any(|a| a == m) => {
                Some(m.to_string())
            }
            Some(_) => None,
        }
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
