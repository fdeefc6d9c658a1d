//! Assistant capability port.
//!
//! This port abstracts the host-provided "ask" function. The bridge never
//! sees how an answer is produced (model routing, network calls, local
//! inference); it only consumes the result, either as one final string or
//! as a live sequence of partial-text events.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Default capacity of the answer event channel.
///
/// Producers that outrun a slow consumer suspend on `send`; the bridge
/// applies no other backpressure.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Invocation options passed alongside the prompt.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    /// Model identifier to answer with. Unknown identifiers are passed
    /// through; what the host does with them is its own business.
    pub model: Option<String>,
}

impl AskOptions {
    /// Options selecting a specific model.
    #[must_use]
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }
}

/// Errors that can occur during a capability invocation.
#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    /// The capability could not be reached at all.
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),

    /// The invocation started but failed before resolving.
    #[error("Assistant invocation failed: {0}")]
    Invocation(String),
}

/// One event in the life of a streaming answer.
///
/// A well-behaved producer emits zero or more `Fragment`s and then exactly
/// one `Completed` or `Failed`. Dropping the sink without a terminal event
/// is treated as completion by consumers.
#[derive(Debug, Clone)]
pub enum AnswerEvent {
    /// One incremental piece of text, in emission order.
    Fragment(String),
    /// The answer resolved; carries the full final text.
    Completed(String),
    /// The invocation failed after streaming may have begun.
    Failed(AssistantError),
}

/// Sending half of an answer event channel, handed to capability
/// implementations.
#[derive(Debug, Clone)]
pub struct AnswerSink {
    tx: mpsc::Sender<AnswerEvent>,
}

impl AnswerSink {
    /// Emit one partial-text fragment.
    ///
    /// Returns `false` if the consumer has gone away; producers should
    /// stop emitting once that happens.
    pub async fn fragment(&self, text: impl Into<String>) -> bool {
        self.tx.send(AnswerEvent::Fragment(text.into())).await.is_ok()
    }

    /// Resolve the answer with its full final text.
    pub async fn complete(self, full_text: impl Into<String>) {
        let _ = self.tx.send(AnswerEvent::Completed(full_text.into())).await;
    }

    /// Terminate the answer with a failure.
    pub async fn fail(self, error: AssistantError) {
        let _ = self.tx.send(AnswerEvent::Failed(error)).await;
    }
}

/// Receiving half of an answer event channel.
///
/// Owned exclusively by one request's response bridge. Terminates exactly
/// once: `next_event` yields `None` after a terminal event or once the
/// producer is gone.
#[derive(Debug)]
pub struct AnswerHandle {
    rx: mpsc::Receiver<AnswerEvent>,
}

impl AnswerHandle {
    /// Create a connected sink/handle pair with the default capacity.
    #[must_use]
    pub fn channel() -> (AnswerSink, Self) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (AnswerSink { tx }, Self { rx })
    }

    /// Receive the next answer event, suspending until one is available.
    ///
    /// Returns `None` once the producer side has been dropped.
    pub async fn next_event(&mut self) -> Option<AnswerEvent> {
        self.rx.recv().await
    }
}

/// Port for the host-provided assistant capability.
///
/// Implementations cover the host-specific invocation mechanism; the
/// bridge only ever talks to this trait. A scripted fake implementing it
/// is enough to test the whole HTTP surface deterministically.
#[async_trait]
pub trait AssistantPort: Send + Sync + fmt::Debug {
    /// Ask for one final answer.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError` if the invocation fails.
    async fn complete(&self, prompt: &str, options: &AskOptions) -> Result<String, AssistantError>;

    /// Ask for an incrementally-delivered answer.
    ///
    /// Infallible at call time: invocation failures arrive in-band as
    /// [`AnswerEvent::Failed`] through the returned handle, because by the
    /// time a streaming response fails the HTTP status is already
    /// committed.
    async fn stream(&self, prompt: &str, options: &AskOptions) -> AnswerHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_emission_order() {
        let (sink, mut handle) = AnswerHandle::channel();

        assert!(sink.fragment("Hel").await);
        assert!(sink.fragment("lo!").await);
        sink.complete("Hello!").await;

        match handle.next_event().await {
            Some(AnswerEvent::Fragment(t)) => assert_eq!(t, "Hel"),
            other => panic!("unexpected event: {other:?}"),
        }
        match handle.next_event().await {
            Some(AnswerEvent::Fragment(t)) => assert_eq!(t, "lo!"),
            other => panic!("unexpected event: {other:?}"),
        }
        match handle.next_event().await {
            Some(AnswerEvent::Completed(t)) => assert_eq!(t, "Hello!"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(handle.next_event().await.is_none());
    }

    #[tokio::test]
    async fn dropped_sink_ends_the_sequence() {
        let (sink, mut handle) = AnswerHandle::channel();
        drop(sink);
        assert!(handle.next_event().await.is_none());
    }

    #[tokio::test]
    async fn fragment_reports_consumer_gone() {
        let (sink, handle) = AnswerHandle::channel();
        drop(handle);
        assert!(!sink.fragment("lost").await);
    }

    #[tokio::test]
    async fn failure_is_a_terminal_event() {
        let (sink, mut handle) = AnswerHandle::channel();
        sink.fail(AssistantError::Invocation("model exploded".into()))
            .await;

        match handle.next_event().await {
            Some(AnswerEvent::Failed(e)) => {
                assert_eq!(e.to_string(), "Assistant invocation failed: model exploded");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(handle.next_event().await.is_none());
    }
}
