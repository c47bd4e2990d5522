use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::Error;
use crate::session::Message;

#[derive(Serialize, Debug)]
pub struct ChatPayload<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

/// Anything that can turn a conversation into a raw response body. The
/// chat proxy only talks to the backend through this trait.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<Value, Error>;
}

/// HTTP client for an Ollama server's `/api/chat` endpoint.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    api_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_url)
    }
}

/// Transport failures (refused, DNS, timeouts) mean the backend is
/// unavailable. Anything else is a bug on our side.
fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::Internal(err.to_string())
    } else {
        Error::UpstreamUnavailable(err.to_string())
    }
}

/// Ollama reports failures as `{"error": "..."}`. Use that when present,
/// otherwise the raw body.
fn upstream_error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<Value, Error> {
        let payload = ChatPayload {
            model,
            messages,
            stream: false,
        };
        let url = self.chat_url();
        tracing::debug!(%url, model, messages = messages.len(), "Sending chat to Ollama");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::error!(%status, body = %body, "Ollama returned an error status");
            return Err(Error::UpstreamStatus {
                status,
                body: upstream_error_detail(&body),
            });
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| Error::Internal(format!("Invalid JSON from Ollama: {e}")))?;
        tracing::debug!(response = %data, "Received response from Ollama");

        Ok(data)
    }
}
