//! Core domain types and port definitions for askbridge.
//!
//! This crate holds everything the HTTP adapter needs to know about the
//! host assistant capability, and nothing about how either side is
//! actually implemented:
//!
//! - [`ports::AssistantPort`] - the seam behind which the host's "ask"
//!   invocation lives
//! - [`ports::AnswerEvent`] / [`ports::AnswerHandle`] - the tagged event
//!   sequence a streaming answer is delivered as
//! - [`catalog`] - the fixed set of model identifiers the host exposes
//! - [`config`] - port-number validation for the listener
//!
//! # Design Rules
//!
//! - No HTTP types in any signature
//! - No process/filesystem implementation details
//! - The capability is opaque: callers only see prompt in, answer out

pub mod catalog;
pub mod config;
pub mod ports;

// Re-export commonly used types for convenience
pub use catalog::{DEFAULT_MODEL, is_known_model, known_models};
pub use config::{BridgeConfig, ConfigError, parse_port};
pub use ports::{AnswerEvent, AnswerHandle, AnswerSink, AskOptions, AssistantError, AssistantPort};
