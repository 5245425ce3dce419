mod runtime;
mod sinks;
mod sse;
mod transport;

use std::time::Duration;

use chat_stream::{MessageDispatcher, MessageDraft, ReconnectPolicy, StreamClient, StreamConfig};
use clap::{Parser, Subcommand};
use time::UtcOffset;
use tracing_subscriber::EnvFilter;

use crate::runtime::TokioRuntime;
use crate::sinks::{StderrNotifier, TerminalView};
use crate::transport::SseTransport;

const STREAM_PATH: &str = "/api/stream";
const MESSAGES_PATH: &str = "/api/messages";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("message is empty")]
    EmptyMessage,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chat-cli", about = "Terminal client for the live chat room")]
struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Seconds to wait before reconnecting (first retry when backing off).
    #[arg(long, default_value_t = 5)]
    reconnect_delay_secs: u64,

    /// Enable exponential backoff capped at this many seconds.
    #[arg(long)]
    backoff_max_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow the room live.
    Tail {
        #[arg(long, env = "CHAT_USERNAME")]
        username: String,
    },
    /// Post one message.
    Send {
        #[arg(long, env = "CHAT_USERNAME")]
        username: String,
        #[arg(long, env = "CHAT_AVATAR")]
        avatar: String,
        message: String,
    },
}

impl Cli {
    fn stream_config(&self) -> StreamConfig {
        let delay = Duration::from_secs(self.reconnect_delay_secs);
        let policy = match self.backoff_max_secs {
            Some(max) => ReconnectPolicy::Backoff { initial: delay, max: Duration::from_secs(max) },
            None => ReconnectPolicy::Fixed(delay),
        };
        StreamConfig::default().with_reconnect(policy)
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, CliError> {
        reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| CliError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Must be read before the runtime starts any threads.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cli, offset))
}

async fn run(cli: Cli, offset: UtcOffset) -> Result<(), CliError> {
    match &cli.command {
        Command::Tail { username } => run_tail(&cli, username, offset).await,
        Command::Send { username, avatar, message } => run_send(&cli, username, avatar, message).await,
    }
}

async fn run_tail(cli: &Cli, username: &str, offset: UtcOffset) -> Result<(), CliError> {
    let url = cli.endpoint(STREAM_PATH)?;
    let transport = SseTransport::new(reqwest::Client::new(), url);
    let client = StreamClient::new(transport, TokioRuntime, cli.stream_config());
    let dispatcher = MessageDispatcher::new(username, TerminalView::new(offset), StderrNotifier);

    client.on_event(move |event| {
        let outcome = dispatcher.handle(event);
        tracing::trace!(kind = %event.kind, ?outcome, "dispatched event");
    });
    client.on_state_change(|state| tracing::info!(%state, "stream state changed"));
    client.start();

    tokio::signal::ctrl_c().await?;
    client.stop();
    Ok(())
}

async fn run_send(cli: &Cli, username: &str, avatar: &str, message: &str) -> Result<(), CliError> {
    let draft = MessageDraft::new(username, avatar, message).ok_or(CliError::EmptyMessage)?;
    let url = cli.endpoint(MESSAGES_PATH)?;
    let response = reqwest::Client::new().post(url).json(&draft).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status(status.as_u16()));
    }
    tracing::info!(%status, "message sent");
    Ok(())
}
