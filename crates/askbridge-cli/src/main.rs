//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: the
//! exec-command assistant adapter, the validated listener config and the
//! bridge server itself.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use askbridge_core::{AssistantPort, BridgeConfig};

mod exec;
use exec::ExecAssistant;

/// Expose a host assistant command as an OpenAI-compatible HTTP endpoint.
#[derive(Debug, Parser)]
#[command(name = "askbridge", version, about)]
struct Cli {
    /// Port to listen on; must be a positive integer.
    #[arg(long, env = "ASKBRIDGE_PORT")]
    port: String,

    /// Address to bind the listener to.
    #[arg(long, env = "ASKBRIDGE_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Shell command invoked once per prompt: prompt on stdin, answer on
    /// stdout, model id in $ASKBRIDGE_MODEL.
    #[arg(long, env = "ASKBRIDGE_ASK_COMMAND")]
    ask_command: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // An invalid port is fatal before anything binds.
    let config = BridgeConfig::from_port_str(&cli.port)?;

    let assistant: Arc<dyn AssistantPort> = Arc::new(ExecAssistant::new(cli.ask_command));

    let listener = TcpListener::bind((cli.bind.as_str(), config.port)).await?;

    // The /kill route cancels this token; so does Ctrl-C.
    let shutdown = CancellationToken::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, shutting down");
            signal_shutdown.cancel();
        }
    });

    askbridge_proxy::serve(listener, assistant, shutdown).await
}
