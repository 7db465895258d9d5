//! Messages sent back to the invoking channel.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visibility of a command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the invoking user sees it.
    Ephemeral,
    /// Posted to the whole channel.
    InChannel,
}

/// Body of a slash-command acknowledgment or `response_url` follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub response_type: ResponseType,
    pub text: String,
}

impl SlackMessage {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: text.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RespondError {
    #[error("failed to reach response_url: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response_url returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Posts follow-up messages to Slack `response_url`s.
#[derive(Debug, Clone)]
pub struct Responder {
    client: Client,
}

impl Responder {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Delivers `message` once; failures are returned, not retried.
    pub async fn send(&self, response_url: &str, message: &SlackMessage) -> Result<(), RespondError> {
        let response = self.client.post(response_url).json(message).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RespondError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
