//! In-memory conversation history keyed by a caller supplied session
//! ID.
//!
//! Sessions are created implicitly the first time they are referenced
//! and live until the process exits. Each session's history sits behind
//! its own async mutex so a whole chat turn (append, upstream call,
//! append, trim) can run without another request for the same session
//! interleaving with it. Requests for different sessions only share the
//! brief map lookup.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// A single conversation turn.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

type History = Arc<Mutex<Vec<Message>>>;

/// Shared handle to every session's history. Cloning is cheap and all
/// clones see the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, History>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, session_id: &str) -> Option<History> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    /// Create an empty session if `session_id` has not been seen
    /// before. Returns `true` when a new session was created.
    pub fn ensure(&self, session_id: &str) -> bool {
        self.ensure_history(session_id).1
    }

    fn ensure_history(&self, session_id: &str) -> (History, bool) {
        if let Some(history) = self.find(session_id) {
            return (history, false);
        }

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another request may have created it between the two locks
        if let Some(history) = sessions.get(session_id) {
            return (Arc::clone(history), false);
        }
        tracing::debug!(session_id, "Creating new session");
        let history = History::default();
        sessions.insert(session_id.to_string(), Arc::clone(&history));
        (history, true)
    }

    /// Take exclusive access to a session's history, creating the
    /// session first if needed. Other callers for the same session wait
    /// until the returned guard is dropped.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        let (history, _) = self.ensure_history(session_id);
        SessionGuard::acquire(session_id, history).await
    }

    pub async fn append(&self, session_id: &str, message: Message) {
        self.lock(session_id).await.append(message);
    }

    /// Drop the oldest messages so at most `max_len` remain. Unknown
    /// sessions are left alone.
    pub async fn trim(&self, session_id: &str, max_len: usize) {
        if let Some(history) = self.find(session_id) {
            SessionGuard::acquire(session_id, history)
                .await
                .trim(max_len);
        }
    }

    /// The full ordered history, or `None` if the session has never been
    /// referenced.
    pub async fn get(&self, session_id: &str) -> Option<Vec<Message>> {
        let history = self.find(session_id)?;
        let messages = history.lock().await.clone();
        Some(messages)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.find(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive access to one session's history for the duration of a chat
/// turn. The lock is released when the guard is dropped, whichever way
/// the turn ends.
#[derive(Debug)]
pub struct SessionGuard {
    session_id: String,
    history: OwnedMutexGuard<Vec<Message>>,
}

impl SessionGuard {
    async fn acquire(session_id: &str, history: History) -> Self {
        Self {
            session_id: session_id.to_string(),
            history: history.lock_owned().await,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn append(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Keep only the most recent `max_len` messages. Returns how many
    /// were dropped.
    pub fn trim(&mut self, max_len: usize) -> usize {
        let len = self.history.len();
        if len <= max_len {
            return 0;
        }
        let dropped = len - max_len;
        tracing::debug!(
            session_id = %self.session_id,
            dropped,
            max_len,
            "Trimming session history"
        );
        self.history.drain(..dropped);
        dropped
    }

    pub fn messages(&self) -> &[Message] {
        &self.history
    }
}
