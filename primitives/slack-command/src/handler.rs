//! Slash-command endpoint and background export.
//!
//! The HTTP reply to Slack is the only acknowledgment. The export itself runs
//! on a detached task per invocation and reports back through `response_url`.
//! Invocations share nothing but the output file, which is last-writer-wins.

use std::{path::Path, sync::Arc};

use article_fetch::{ArticleClient, ArticleError, build_items_url, pretty_print, write_output};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use tracing::{error, info, warn};

use crate::{
    HandlerConfig,
    payload::{self, Inbound, SlashCommand},
    respond::{Responder, SlackMessage},
    signature,
};

/// Process-wide state shared by every request and background task.
pub struct AppState {
    pub config: HandlerConfig,
    pub articles: ArticleClient,
    pub responder: Responder,
}

impl AppState {
    /// Shares one HTTP client between the Qiita API and Slack follow-ups.
    pub fn new(config: HandlerConfig, client: Client) -> Self {
        Self {
            config,
            articles: ArticleClient::from_client(client.clone()),
            responder: Responder::new(client),
        }
    }
}

/// Result of one execution phase.
#[derive(Debug)]
pub enum Outcome {
    /// The export was written; `url` is the request that produced it.
    Saved { url: String },
    Failed(ArticleError),
}

impl Outcome {
    /// Follow-up text reported to the channel.
    pub fn text(&self, output: &Path) -> String {
        match self {
            Self::Saved { url } => format!(
                ":white_check_mark: Saved {} (URL: {url})",
                output.display()
            ),
            Self::Failed(err @ ArticleError::MissingCredential { .. }) => format!(":x: {err}"),
            Self::Failed(err) => format!(":x: Failed: {err}"),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Builds the webhook router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(&state.config.path, post(handle_command))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Acknowledges a slash command and schedules its export.
async fn handle_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(ref secret) = state.config.signing_secret {
        if let Err(e) = signature::verify(secret, &headers, &body) {
            warn!(error = %e, "rejected unsigned slash command");
            return (StatusCode::UNAUTHORIZED, "Invalid signature").into_response();
        }
    }

    let command = match payload::parse_form(&body) {
        Ok(Inbound::Command(command)) => command,
        Ok(Inbound::SslCheck) => return StatusCode::OK.into_response(),
        Err(e) => {
            warn!(error = %e, "malformed slash command payload");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    if !state.config.accepts(&command.command) {
        warn!(command = %command.command, "unsupported slash command");
        let text = format!(":warning: Unsupported command `{}`", command.command);
        return Json(SlackMessage::ephemeral(text)).into_response();
    }

    info!(
        command = %command.command,
        channel = %command.channel_id,
        user = %command.user_id,
        "slash command received"
    );

    let ack = SlackMessage::ephemeral(format!(
        ":hourglass_flowing_sand: Fetching Qiita articles and saving them to {}…",
        state.config.output_path.display()
    ));

    tokio::spawn(execute(Arc::clone(&state), command));

    Json(ack).into_response()
}

/// Runs the export for one invocation and posts the follow-up.
///
/// Never panics on failure; every error ends up in the returned [`Outcome`]
/// and in the follow-up message.
pub async fn execute(state: Arc<AppState>, command: SlashCommand) -> Outcome {
    let outcome = match export(&state, &command).await {
        Ok(url) => {
            info!(command = %command.command, %url, "export saved");
            Outcome::Saved { url }
        }
        Err(e) => {
            error!(command = %command.command, status = ?e.status(), error = %e, "export failed");
            Outcome::Failed(e)
        }
    };

    let text = outcome.text(&state.config.output_path);
    let message = if state.config.in_channel && outcome.is_saved() {
        SlackMessage::in_channel(text)
    } else {
        SlackMessage::ephemeral(text)
    };

    if command.response_url.is_empty() {
        warn!(command = %command.command, "no response_url, follow-up dropped");
    } else if let Err(e) = state.responder.send(&command.response_url, &message).await {
        error!(command = %command.command, error = %e, "failed to deliver follow-up");
    }

    outcome
}

async fn export(state: &AppState, command: &SlashCommand) -> Result<String, ArticleError> {
    let token = state.config.credential()?;
    let url = build_items_url(&state.config.api_base_url, command.query());

    let raw = state.articles.fetch(&url, token).await?;
    let pretty = pretty_print(&raw)?;
    write_output(&state.config.output_path, &pretty).await?;

    Ok(url)
}
