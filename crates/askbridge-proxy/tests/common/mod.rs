//! Shared test fixtures: a scripted assistant capability and an app
//! builder wiring it into the bridge router.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tokio_util::sync::CancellationToken;

use askbridge_core::{AnswerHandle, AskOptions, AssistantError, AssistantPort};
use askbridge_proxy::{AppState, router};

/// One recorded capability invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub model: Option<String>,
}

/// Deterministic `AssistantPort` implementation driven by a script.
///
/// Records every invocation so tests can assert the capability was (or
/// was not) reached, with which prompt and model.
#[derive(Debug, Default)]
pub struct ScriptedAssistant {
    reply: String,
    fragments: Vec<String>,
    failure: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedAssistant {
    /// An assistant that resolves every prompt with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }

    /// An assistant that streams `fragments` before resolving with `reply`.
    pub fn with_fragments(
        reply: impl Into<String>,
        fragments: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            reply: reply.into(),
            fragments: fragments.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// An assistant whose every invocation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, prompt: &str, options: &AskOptions) {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            model: options.model.clone(),
        });
    }
}

#[async_trait]
impl AssistantPort for ScriptedAssistant {
    async fn complete(&self, prompt: &str, options: &AskOptions) -> Result<String, AssistantError> {
        self.record(prompt, options);
        match &self.failure {
            Some(message) => Err(AssistantError::Invocation(message.clone())),
            None => Ok(self.reply.clone()),
        }
    }

    async fn stream(&self, prompt: &str, options: &AskOptions) -> AnswerHandle {
        self.record(prompt, options);
        let (sink, handle) = AnswerHandle::channel();
        let fragments = self.fragments.clone();
        let reply = self.reply.clone();
        let failure = self.failure.clone();

        tokio::spawn(async move {
            for fragment in fragments {
                if !sink.fragment(fragment).await {
                    return;
                }
            }
            match failure {
                Some(message) => sink.fail(AssistantError::Invocation(message)).await,
                None => sink.complete(reply).await,
            }
        });

        handle
    }
}

/// Build the bridge app around a scripted assistant.
pub fn app(assistant: Arc<ScriptedAssistant>) -> (Router, CancellationToken) {
    let shutdown = CancellationToken::new();
    let router = router(AppState::new(assistant, shutdown.clone()));
    (router, shutdown)
}
