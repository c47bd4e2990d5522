mod core;
pub mod reply;

pub use self::core::{ChatPayload, InferenceBackend, OllamaClient};
pub use reply::{DEFAULT_REPLY_FIELDS, ReplyField, extract_reply};
