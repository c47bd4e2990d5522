//! One chat turn end to end: record the user's message, forward the
//! session history to the inference backend, record the reply and keep
//! the history bounded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{AppConfig, Error};
use crate::ollama::{DEFAULT_REPLY_FIELDS, InferenceBackend, ReplyField, extract_reply};
use crate::session::{Message, Role, SessionStore};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub model: String,
}

#[derive(Clone)]
pub struct ChatProxy {
    config: AppConfig,
    sessions: SessionStore,
    backend: Arc<dyn InferenceBackend>,
    reply_fields: &'static [ReplyField],
}

impl std::fmt::Debug for ChatProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatProxy")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .field("reply_fields", &self.reply_fields)
            .finish_non_exhaustive()
    }
}

impl ChatProxy {
    pub fn new(
        config: AppConfig,
        sessions: SessionStore,
        backend: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self {
            config,
            sessions,
            backend,
            reply_fields: DEFAULT_REPLY_FIELDS,
        }
    }

    /// Override where reply text is looked for in backend responses.
    pub fn with_reply_fields(mut self, fields: &'static [ReplyField]) -> Self {
        self.reply_fields = fields;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run a single chat turn.
    ///
    /// The session is locked for the whole turn so concurrent requests
    /// for the same session are applied one after the other. If the
    /// backend call fails the user's message stays in the history with no
    /// assistant reply after it. The history never grows past
    /// `max_history`, whether or not the turn succeeds.
    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatResponse, Error> {
        let ChatRequest {
            session_id,
            message,
            model,
        } = request;

        if session_id.trim().is_empty() {
            return Err(Error::Validation("session_id cannot be empty.".to_string()));
        }
        if message.trim().is_empty() {
            return Err(Error::Validation("message cannot be empty.".to_string()));
        }
        let model = self.config.resolve_model(model.as_deref()).ok_or_else(|| {
            Error::Validation(format!(
                "Model '{}' is not available.",
                model.unwrap_or_default()
            ))
        })?;

        tracing::info!(session_id = %session_id, model = %model, "Chat request received");

        let mut session = self.sessions.lock(&session_id).await;
        session.append(Message::new(Role::User, &message));
        // The user's message is kept even if the turn fails below
        session.trim(self.config.max_history);

        let data = self
            .backend
            .chat(&model, session.messages())
            .await
            .inspect_err(|e| {
                tracing::error!(session_id = %session_id, error = %e, "Chat with Ollama failed");
            })?;

        let Some(reply) = extract_reply(&data, self.reply_fields) else {
            tracing::warn!(session_id = %session_id, "Ollama response content is empty");
            return Err(Error::EmptyReply);
        };

        session.append(Message::new(Role::Assistant, &reply));
        session.trim(self.config.max_history);
        tracing::debug!(
            session_id = %session_id,
            history_len = session.messages().len(),
            "Chat turn complete"
        );

        Ok(ChatResponse {
            response: reply,
            session_id,
            model,
        })
    }

    pub async fn get_history(&self, session_id: &str) -> Result<Vec<Message>, Error> {
        match self.sessions.get(session_id).await {
            Some(history) => {
                tracing::info!(session_id, "Retrieving history for session");
                Ok(history)
            }
            None => {
                tracing::warn!(session_id, "History requested for unknown session");
                Err(Error::NotFound {
                    entity: "Session",
                    id: session_id.to_string(),
                })
            }
        }
    }
}
