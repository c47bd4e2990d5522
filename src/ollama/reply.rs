//! Pulling the generated text out of a backend response body.
//!
//! Current Ollama versions answer `/api/chat` with
//! `{"message": {"role": "assistant", "content": "..."}}`. Older ones
//! (and `/api/generate`) put the text in a top level `response` field.
//! The fields are tried in order and the first non-empty one wins.

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyField {
    /// `message.content`
    MessageContent,
    /// top level `response`
    Response,
}

/// Order in which reply fields are looked up.
pub const DEFAULT_REPLY_FIELDS: &[ReplyField] = &[ReplyField::MessageContent, ReplyField::Response];

impl ReplyField {
    pub fn extract<'a>(&self, body: &'a Value) -> Option<&'a str> {
        let value = match self {
            ReplyField::MessageContent => body.get("message")?.get("content")?,
            ReplyField::Response => body.get("response")?,
        };
        value.as_str().filter(|s| !s.is_empty())
    }
}

/// Returns `None` when none of the `fields` yield any text.
pub fn extract_reply(body: &Value, fields: &[ReplyField]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| field.extract(body))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_message_content() {
        let body = json!({
            "model": "gemma3:1b",
            "message": {"role": "assistant", "content": "Hi!"},
            "response": "stale",
            "done": true
        });
        assert_eq!(extract_reply(&body, DEFAULT_REPLY_FIELDS).as_deref(), Some("Hi!"));
    }

    #[test]
    fn test_falls_back_to_response() {
        let body = json!({"response": "Hello from generate"});
        assert_eq!(
            extract_reply(&body, DEFAULT_REPLY_FIELDS).as_deref(),
            Some("Hello from generate")
        );

        // Empty content counts as missing
        let body = json!({"message": {"role": "assistant", "content": ""}, "response": "fallback"});
        assert_eq!(
            extract_reply(&body, DEFAULT_REPLY_FIELDS).as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn test_nothing_extractable() {
        assert_eq!(extract_reply(&json!({"done": true}), DEFAULT_REPLY_FIELDS), None);
        assert_eq!(extract_reply(&json!({"message": {"content": 42}}), DEFAULT_REPLY_FIELDS), None);
        assert_eq!(extract_reply(&json!("just a string"), DEFAULT_REPLY_FIELDS), None);
    }

    #[test]
    fn test_custom_field_order() {
        let body = json!({"message": {"content": "chat"}, "response": "generate"});
        assert_eq!(
            extract_reply(&body, &[ReplyField::Response, ReplyField::MessageContent]).as_deref(),
            Some("generate")
        );
        assert_eq!(extract_reply(&body, &[]), None);
    }
}
