//! External-command assistant adapter.
//!
//! The one concrete [`AssistantPort`] this repository ships: the host
//! hooks in by supplying a shell command that reads the prompt on stdin
//! and writes the answer on stdout. The selected model identifier is
//! exposed to the command as `ASKBRIDGE_MODEL`. In streaming mode each
//! stdout read becomes one fragment; a non-zero exit becomes a capability
//! failure carrying stderr.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tracing::debug;

use askbridge_core::{AnswerHandle, AnswerSink, AskOptions, AssistantError, AssistantPort};

/// Env var carrying the model identifier into the hook command.
const MODEL_ENV: &str = "ASKBRIDGE_MODEL";

/// Assistant capability backed by an external command.
#[derive(Debug, Clone)]
pub struct ExecAssistant {
    command: String,
}

impl ExecAssistant {
    /// Wrap a shell command as the assistant capability.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn spawn(&self, options: &AskOptions) -> Result<Child, AssistantError> {
        let mut cmd = shell_command(&self.command);
        if let Some(model) = &options.model {
            cmd.env(MODEL_ENV, model);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = %self.command, "Spawning ask command");
        cmd.spawn()
            .map_err(|e| AssistantError::Unavailable(format!("Failed to spawn ask command: {e}")))
    }
}

#[async_trait]
impl AssistantPort for ExecAssistant {
    async fn complete(&self, prompt: &str, options: &AskOptions) -> Result<String, AssistantError> {
        let mut child = self.spawn(options)?;
        let stdin = child.stdin.take();

        // Feed stdin while collecting output. Writing the whole prompt
        // first can wedge against a full stdout pipe buffer.
        let (fed, output) = tokio::join!(feed_prompt(stdin, prompt), child.wait_with_output());
        if let Err(e) = fed {
            debug!("Prompt write ended early: {e}");
        }
        let output = output
            .map_err(|e| AssistantError::Invocation(format!("Failed to await ask command: {e}")))?;

        if output.status.success() {
            Ok(trim_answer(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ))
        } else {
            Err(exit_error(output.status, &output.stderr))
        }
    }

    async fn stream(&self, prompt: &str, options: &AskOptions) -> AnswerHandle {
        let (sink, handle) = AnswerHandle::channel();

        let child = match self.spawn(options) {
            Ok(child) => child,
            Err(e) => {
                sink.fail(e).await;
                return handle;
            }
        };

        let prompt = prompt.to_string();
        tokio::spawn(async move { pump_child(child, prompt, sink).await });
        handle
    }
}

/// Drive one child process for a streaming answer: feed the prompt, relay
/// stdout reads as fragments, then resolve or fail on exit.
async fn pump_child(mut child: Child, prompt: String, sink: AnswerSink) {
    let stdin = child.stdin.take();

    // Same pipe discipline as `complete`: the writer runs beside the
    // read loop so neither side can wedge the other.
    let feeder = tokio::spawn(async move {
        if let Err(e) = feed_prompt(stdin, &prompt).await {
            debug!("Prompt write ended early: {e}");
        }
    });

    let Some(mut stdout) = child.stdout.take() else {
        sink.fail(AssistantError::Invocation(
            "Ask command has no stdout".to_string(),
        ))
        .await;
        return;
    };

    let mut answer = String::new();
    let mut buf = [0u8; 4096];
    loop {
        match stdout.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let text = String::from_utf8_lossy(&buf[..n]).into_owned();
                answer.push_str(&text);
                if !sink.fragment(text).await {
                    // Consumer went away; reap the child and stop.
                    let _ = child.kill().await;
                    return;
                }
            }
            Err(e) => {
                sink.fail(AssistantError::Invocation(format!(
                    "Failed to read ask command output: {e}"
                )))
                .await;
                return;
            }
        }
    }

    let _ = feeder.await;
    let output = match child.wait_with_output().await {
        Ok(output) => output,
        Err(e) => {
            sink.fail(AssistantError::Invocation(format!(
                "Failed to await ask command: {e}"
            )))
            .await;
            return;
        }
    };

    if output.status.success() {
        sink.complete(trim_answer(answer)).await;
    } else {
        sink.fail(exit_error(output.status, &output.stderr)).await;
    }
}

async fn feed_prompt(stdin: Option<ChildStdin>, prompt: &str) -> Result<(), AssistantError> {
    let Some(mut stdin) = stdin else {
        return Err(AssistantError::Invocation(
            "Ask command has no stdin".to_string(),
        ));
    };
    stdin
        .write_all(prompt.as_bytes())
        .await
        .map_err(|e| AssistantError::Invocation(format!("Failed to write prompt: {e}")))?;
    // Dropping stdin closes the pipe so the command sees EOF.
    drop(stdin);
    Ok(())
}

fn exit_error(status: std::process::ExitStatus, stderr: &[u8]) -> AssistantError {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        AssistantError::Invocation(format!("Ask command failed with {status}"))
    } else {
        AssistantError::Invocation(stderr.to_string())
    }
}

/// Strip one trailing newline, the usual artifact of CLI output.
fn trim_answer(mut answer: String) -> String {
    if answer.ends_with('\n') {
        answer.pop();
        if answer.ends_with('\r') {
            answer.pop();
        }
    }
    answer
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
