//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the bridge expects from the host
//! application. They contain no implementation details and use only
//! domain types.

pub mod assistant;

pub use assistant::{
    AnswerEvent, AnswerHandle, AnswerSink, AskOptions, AssistantError, AssistantPort,
};
