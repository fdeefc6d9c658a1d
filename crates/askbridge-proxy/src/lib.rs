//! OpenAI-compatible HTTP adapter for the askbridge assistant capability.
//!
//! This crate is the whole HTTP surface of the bridge:
//!
//! - [`models`] - OpenAI wire types plus the bridge's error body
//! - [`translate`] - chat request validation and prompt extraction
//! - [`stream`] - answer events bridged onto a Server-Sent-Events body
//! - [`server`] - router, handlers and the `serve()` loop
//!
//! Everything here maps between HTTP and [`askbridge_core`]'s
//! `AssistantPort`; no host-invocation details live in this crate.

#![deny(unsafe_code)]

pub mod models;
pub mod server;
pub mod stream;
pub mod translate;

pub use server::{AppState, router, serve};
