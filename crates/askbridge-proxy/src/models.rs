//! OpenAI API data models for request/response handling.
//!
//! These types match the wire shapes the bridge's clients expect. Domain
//! types live in `askbridge-core`; this module handles the API layer
//! mapping only.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

// =============================================================================
// Chat Completion Response Types
// =============================================================================

/// Response from /v1/chat/completions (non-streaming).
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// A single chat completion choice.
#[derive(Debug, Clone, Serialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: String,
}

/// The assistant's answer inside a choice.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

/// Token usage statistics. The capability reports none, so this always
/// serializes as the empty object the clients are promised.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Usage {}

impl ChatCompletionResponse {
    /// Build the single-choice response for a resolved answer.
    #[must_use]
    pub fn new(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: completion_id(),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.into(),
            choices: vec![ChatChoice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant".to_string(),
                    content: content.into(),
                },
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        }
    }
}

// =============================================================================
// Streaming Chunk Types
// =============================================================================

/// Streaming chunk from /v1/chat/completions, one per SSE frame.
///
/// `finish_reason` sits at the top level of the chunk; that is the shape
/// the bridge has always emitted and existing clients parse.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// A single streaming choice.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
}

/// Delta content in a streaming chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkDelta {
    pub content: String,
}

impl ChatCompletionChunk {
    /// A fragment chunk carrying one piece of partial text.
    #[must_use]
    pub fn fragment(id: &str, created: i64, model: &str, content: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created,
            model: model.to_string(),
            choices: vec![ChunkChoice {
                delta: ChunkDelta {
                    content: content.into(),
                },
            }],
            finish_reason: None,
        }
    }

    /// The terminal chunk: empty delta, `finish_reason: "stop"`.
    #[must_use]
    pub fn finished(id: &str, created: i64, model: &str) -> Self {
        Self {
            finish_reason: Some("stop".to_string()),
            ..Self::fragment(id, created, model, String::new())
        }
    }
}

/// Fresh completion id in the `chatcmpl-` namespace.
#[must_use]
pub fn completion_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4())
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// One entry in the /v1/models listing.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    /// Sequential index into the fixed catalog.
    pub id: usize,
    /// The model identifier itself.
    pub name: String,
}

/// Enumerate the fixed catalog as `{id, name}` entries.
#[must_use]
pub fn model_entries() -> Vec<ModelEntry> {
    askbridge_core::known_models()
        .iter()
        .enumerate()
        .map(|(id, name)| ModelEntry {
            id,
            name: (*name).to_string(),
        })
        .collect()
}

// =============================================================================
// Error Response Types
// =============================================================================

/// JSON error body: a single `error` string, used identically for HTTP
/// error responses and in-band SSE error frames.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message in the standard error shape.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
