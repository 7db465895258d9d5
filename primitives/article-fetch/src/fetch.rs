//! Upstream Qiita API client.

use std::time::Duration;

use reqwest::{Client, header::ACCEPT};
use tracing::debug;

use crate::ArticleError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Thin wrapper over a shared [`reqwest::Client`] for the items endpoint.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    client: Client,
}

impl ArticleClient {
    /// Builds a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ArticleError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Issues a single GET against `url` and returns the body verbatim.
    ///
    /// Any 2xx status is success. Other statuses surface as
    /// [`ArticleError::Upstream`]; no retry is attempted.
    pub async fn fetch(&self, url: &str, token: Option<&str>) -> Result<String, ArticleError> {
        let mut request = self.client.get(url).header(ACCEPT, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "Qiita API responded");

        if !status.is_success() {
            return Err(ArticleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
