//! Chat request translation.
//!
//! Turns an OpenAI-shaped chat-completion body into the one thing the
//! capability understands: a prompt string, plus a model id and a
//! streaming flag. Validation failures here are 400s and must happen
//! before the capability is ever invoked.

use serde_json::Value;
use thiserror::Error;

use askbridge_core::DEFAULT_MODEL;

/// The capability-ready form of a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedRequest {
    /// The last message's content, verbatim.
    pub prompt: String,
    /// Requested model, or the catalog default.
    pub model: String,
    /// Whether the client asked for SSE delivery.
    pub stream: bool,
}

/// Validation failures while translating a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// `messages` is absent, not an array, or empty.
    #[error("Missing or invalid 'messages' in request body")]
    MissingMessages,

    /// The last message has no usable `content`.
    #[error("Missing 'content' in the last message")]
    MissingContent,
}

/// Translate a parsed request body.
///
/// The prompt is the `content` of the last message; earlier messages are
/// ignored (the capability keeps no conversation state). `stream` is a
/// strict boolean check: any non-`true` value, including truthy strings
/// and numbers, means non-streaming.
///
/// # Errors
///
/// Returns [`TranslateError`] when `messages` or the last `content` is
/// missing or unusable.
pub fn translate(body: &Value) -> Result<TranslatedRequest, TranslateError> {
    let messages = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or(TranslateError::MissingMessages)?;

    let last = messages.last().ok_or(TranslateError::MissingMessages)?;

    let prompt = last
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .ok_or(TranslateError::MissingContent)?;

    let model = body
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MODEL);

    let stream = body.get("stream") == Some(&Value::Bool(true));

    Ok(TranslatedRequest {
        prompt: prompt.to_string(),
        model: model.to_string(),
        stream,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_prompt_from_last_message() {
        let body = json!({
            "model": "anthropic-claude-sonnet",
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hi"}
            ],
            "stream": false
        });

        let translated = translate(&body).unwrap();
        assert_eq!(translated.prompt, "Hi");
        assert_eq!(translated.model, "anthropic-claude-sonnet");
        assert!(!translated.stream);
    }

    #[test]
    fn model_defaults_when_absent() {
        let body = json!({"messages": [{"role": "user", "content": "Hi"}]});
        assert_eq!(translate(&body).unwrap().model, DEFAULT_MODEL);
    }

    #[test]
    fn missing_messages_is_rejected() {
        assert_eq!(
            translate(&json!({})),
            Err(TranslateError::MissingMessages)
        );
    }

    #[test]
    fn non_array_messages_is_rejected() {
        let body = json!({"messages": "not a list"});
        assert_eq!(translate(&body), Err(TranslateError::MissingMessages));
    }

    #[test]
    fn empty_messages_is_rejected() {
        let body = json!({"messages": []});
        assert_eq!(translate(&body), Err(TranslateError::MissingMessages));
    }

    #[test]
    fn empty_content_is_rejected() {
        let body = json!({"messages": [{"role": "user", "content": ""}]});
        assert_eq!(translate(&body), Err(TranslateError::MissingContent));
    }

    #[test]
    fn absent_content_is_rejected() {
        let body = json!({"messages": [{"role": "user"}]});
        assert_eq!(translate(&body), Err(TranslateError::MissingContent));
    }

    #[test]
    fn non_string_content_is_rejected() {
        let body = json!({"messages": [{"role": "user", "content": 42}]});
        assert_eq!(translate(&body), Err(TranslateError::MissingContent));
    }

    #[test]
    fn stream_requires_a_real_boolean() {
        let truthy = json!({"messages": [{"role": "user", "content": "Hi"}], "stream": "true"});
        assert!(!translate(&truthy).unwrap().stream);

        let numeric = json!({"messages": [{"role": "user", "content": "Hi"}], "stream": 1});
        assert!(!translate(&numeric).unwrap().stream);

        let streaming = json!({"messages": [{"role": "user", "content": "Hi"}], "stream": true});
        assert!(translate(&streaming).unwrap().stream);
    }

    #[test]
    fn only_the_last_message_matters() {
        let body = json!({
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "second"},
                {"role": "user", "content": "third"}
            ]
        });
        assert_eq!(translate(&body).unwrap().prompt, "third");
    }
}
