//! Error taxonomy shared by every export step.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single export step.
///
/// None of these are retried; the caller reports them and moves on.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// A required credential is absent from the process configuration.
    #[error("{variable} is not set")]
    MissingCredential { variable: &'static str },

    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("request to Qiita API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Qiita API HTTP {status} : {body}")]
    Upstream { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("Qiita API returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing the output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArticleError {
    /// HTTP status carried by an upstream failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
