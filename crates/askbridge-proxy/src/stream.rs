//! Answer-event → Server-Sent-Events bridging.
//!
//! The capability delivers a streaming answer as a sequence of tagged
//! events; this module turns that sequence into the SSE frames an
//! OpenAI-streaming client expects, on the fly.
//!
//! Once the SSE headers go out the HTTP status is committed, so failures
//! mid-stream are reported in-band as a `data: {"error": ...}` frame
//! rather than a status change. Per response the frames walk a one-way
//! state machine: zero or more fragment chunks, then either a terminal
//! `finish_reason: "stop"` chunk followed by the `[DONE]` sentinel, or a
//! single error frame. Nothing is ever emitted after `[DONE]` or after an
//! error frame.

use std::convert::Infallible;

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::Stream;
use serde::Serialize;
use tracing::warn;

use askbridge_core::{AnswerEvent, AnswerHandle};

use crate::models::{ChatCompletionChunk, ErrorBody, completion_id};

/// The stream-completion sentinel frame.
const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Where a response's frame sequence currently stands.
enum Phase {
    /// Forwarding fragments; no terminal frame sent yet.
    Streaming,
    /// Terminal stop chunk sent; `[DONE]` still owed.
    FinishSent,
    /// Terminal in both outcomes; nothing more is emitted.
    Closed,
}

/// State threaded through the `unfold` stream.
struct BridgeState {
    handle: AnswerHandle,
    id: String,
    created: i64,
    model: String,
    phase: Phase,
}

/// Build the SSE response for one streaming chat completion.
///
/// Consumes the request's `AnswerHandle`; the response body drives it.
pub fn sse_response(handle: AnswerHandle, model: String) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream")
        .header("cache-control", "no-cache")
        .header("connection", "keep-alive")
        .body(Body::from_stream(answer_frames(handle, model)))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Convert an answer event sequence into SSE frame bytes.
///
/// Fragments are forwarded one frame each, in arrival order. `Completed`
/// (or the producer dropping its sink) yields the terminal stop chunk and
/// then the `[DONE]` sentinel; `Failed` yields one error frame. The
/// stream ends immediately after either terminal.
pub(crate) fn answer_frames(
    handle: AnswerHandle,
    model: String,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    let state = BridgeState {
        handle,
        id: completion_id(),
        created: chrono::Utc::now().timestamp(),
        model,
        phase: Phase::Streaming,
    };

    futures_util::stream::unfold(state, |mut st| async move {
        match st.phase {
            Phase::Closed => None,
            Phase::FinishSent => {
                st.phase = Phase::Closed;
                Some((Ok(Bytes::from_static(DONE_FRAME.as_bytes())), st))
            }
            Phase::Streaming => {
                let out = match st.handle.next_event().await {
                    Some(AnswerEvent::Fragment(text)) => {
                        frame(&ChatCompletionChunk::fragment(
                            &st.id, st.created, &st.model, text,
                        ))
                    }
                    Some(AnswerEvent::Failed(error)) => {
                        warn!(model = %st.model, %error, "Streaming answer failed");
                        st.phase = Phase::Closed;
                        frame(&ErrorBody::new(error.to_string()))
                    }
                    // Resolution, or a producer that went away without
                    // resolving: both close the stream normally.
                    Some(AnswerEvent::Completed(_)) | None => {
                        st.phase = Phase::FinishSent;
                        frame(&ChatCompletionChunk::finished(&st.id, st.created, &st.model))
                    }
                };
                Some((Ok(out), st))
            }
        }
    })
}

/// Format one `data: <json>\n\n` frame.
fn frame<T: Serialize>(payload: &T) -> Bytes {
    let json = serde_json::to_string(payload).unwrap_or_default();
    Bytes::from(format!("data: {json}\n\n"))
}
