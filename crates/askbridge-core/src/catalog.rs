//! The fixed set of model identifiers the host assistant exposes.
//!
//! The catalog is host-defined and static: the bridge enumerates it for
//! `GET /v1/models` and uses [`DEFAULT_MODEL`] when a request names no
//! model. Identifiers outside the catalog are still passed through to the
//! capability; rejecting them is not the bridge's call.

/// Model used when a chat request does not name one.
pub const DEFAULT_MODEL: &str = "openai-gpt-4o-mini";

/// All model identifiers the host assistant advertises.
const KNOWN_MODELS: &[&str] = &[
    "openai-gpt-4o-mini",
    "openai-gpt-4o",
    "openai-gpt-4-turbo",
    "anthropic-claude-haiku",
    "anthropic-claude-sonnet",
    "anthropic-claude-opus",
    "llama3.1-70b",
    "mixtral-8x7b",
];

/// The host-defined model identifiers, in a stable order.
#[must_use]
pub const fn known_models() -> &'static [&'static str] {
    KNOWN_MODELS
}

/// Whether `name` is one of the advertised identifiers.
#[must_use]
pub fn is_known_model(name: &str) -> bool {
    KNOWN_MODELS.contains(&name)
}
