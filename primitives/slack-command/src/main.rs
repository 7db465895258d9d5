//! Slack Command - Qiita Export Slash Command
//!
//! Listens for Slack slash commands, acknowledges each one immediately and
//! exports the latest Qiita articles matching the command text to a JSON file.
//!
//! # Usage
//!
//! ```bash
//! # Default: port 3000, /items command, token required
//! QIITA_TOKEN=... slack-command
//!
//! # Verify Slack signatures and answer both command names
//! slack-command --signing-secret $SLACK_SIGNING_SECRET --commands /qiita,/items
//!
//! # Anonymous API access (lower rate limit)
//! slack-command --require-token false
//! ```

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use article_fetch::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS};
use clap::{ArgAction, Parser};
use slack_command::{AppState, HandlerConfig, config::DEFAULT_COMMAND_PATH, router};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Slack slash-command receiver that saves Qiita articles to disk.
#[derive(Parser, Debug, Clone)]
#[command(name = "slack-command")]
#[command(about = "Exports Qiita articles to a JSON file on Slack slash commands")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Host to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Path Slack posts slash commands to.
    #[arg(long, env = "SLACK_COMMAND_PATH", default_value = DEFAULT_COMMAND_PATH)]
    path: String,

    /// Comma-separated slash commands to answer.
    #[arg(
        short,
        long,
        env = "SLACK_COMMANDS",
        value_delimiter = ',',
        default_value = "/items"
    )]
    commands: Vec<String>,

    /// Slack signing secret. Requests are not verified when unset.
    #[arg(long, env = "SLACK_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: Option<String>,

    /// Qiita access token sent as a bearer credential.
    #[arg(short, long, env = "QIITA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Fail invocations when no token is configured.
    #[arg(long, env = "QIITA_REQUIRE_TOKEN", default_value_t = true, action = ArgAction::Set)]
    require_token: bool,

    /// Qiita API root.
    #[arg(long, env = "QIITA_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    /// File overwritten with each export.
    #[arg(short, long, env = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "QIITA_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Post success messages to the channel instead of only the invoking user.
    #[arg(long, env = "SLACK_RESPONSE_IN_CHANNEL")]
    in_channel: bool,
}

impl Args {
    fn handler_config(&self) -> HandlerConfig {
        HandlerConfig {
            commands: self
                .commands
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            path: self.path.clone(),
            signing_secret: self.signing_secret.clone(),
            token: self.token.clone(),
            require_token: self.require_token,
            api_base_url: self.api_base_url.clone(),
            output_path: self.output.clone(),
            in_channel: self.in_channel,
        }
    }
}

/// Resolves on SIGTERM or Ctrl-C.
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.handler_config();

    if config.signing_secret.is_none() {
        warn!("SLACK_SIGNING_SECRET not set, slash commands will not be verified");
    }
    if config.credential().is_err() {
        warn!("QIITA_TOKEN not set, every invocation will fail until it is configured");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("failed to build HTTP client")?;

    let path = config.path.clone();
    let commands = config.commands.join(",");
    let app = router(Arc::new(AppState::new(config, client)));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, %path, %commands, "listening for slash commands");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::try_parse_from(["slack-command"]).unwrap();
        assert_eq!(args.path, "/slack/events");
        assert!(args.require_token);
        assert_eq!(args.output, PathBuf::from("output.json"));
        assert_eq!(args.timeout, 30);
    }

    #[test]
    fn commands_are_split_and_trimmed() {
        let args =
            Args::try_parse_from(["slack-command", "--commands", "/qiita, /items,"]).unwrap();
        assert_eq!(args.handler_config().commands, vec!["/qiita", "/items"]);
    }

    #[test]
    fn token_requirement_can_be_disabled() {
        let args = Args::try_parse_from(["slack-command", "--require-token", "false"]).unwrap();
        let config = args.handler_config();
        assert!(!config.require_token);
        assert!(config.credential().is_ok());
    }
}
