//! Public types for the chat API

pub use crate::proxy::{ChatRequest, ChatResponse};
pub use crate::session::{Message, Role};

/// Body of `GET /chat/history/{session_id}`, oldest message first
pub type ChatHistoryResponse = Vec<Message>;
