//! Runtime settings for the command handler.

use std::path::PathBuf;

use article_fetch::{ArticleError, DEFAULT_BASE_URL, DEFAULT_OUTPUT_PATH};

/// Environment variable holding the Qiita access token.
pub const TOKEN_VARIABLE: &str = "QIITA_TOKEN";

/// Default route for slash-command deliveries.
pub const DEFAULT_COMMAND_PATH: &str = "/slack/events";

/// Settings shared read-only by every invocation.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Slash commands this handler answers, e.g. `/items`.
    pub commands: Vec<String>,
    /// Route the webhook listens on.
    pub path: String,
    /// Slack signing secret; requests are not verified when absent.
    pub signing_secret: Option<String>,
    /// Qiita access token.
    pub token: Option<String>,
    /// Refuse to fetch without a token.
    pub require_token: bool,
    /// Qiita API root.
    pub api_base_url: String,
    /// File overwritten by every successful export.
    pub output_path: PathBuf,
    /// Post success follow-ups to the whole channel instead of the invoker only.
    pub in_channel: bool,
}

impl HandlerConfig {
    /// Whether `command` is one of the configured slash commands.
    pub fn accepts(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    /// Token to send upstream.
    ///
    /// Blank tokens count as absent.
    pub fn credential(&self) -> Result<Option<&str>, ArticleError> {
        let token = self.token.as_deref().filter(|t| !t.trim().is_empty());
        match token {
            None if self.require_token => Err(ArticleError::MissingCredential {
                variable: TOKEN_VARIABLE,
            }),
            token => Ok(token),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            commands: vec!["/items".to_string()],
            path: DEFAULT_COMMAND_PATH.to_string(),
            signing_secret: None,
            token: None,
            require_token: true,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            in_channel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_token_must_be_present() {
        let config = HandlerConfig::default();
        let err = config.credential().unwrap_err();
        assert!(matches!(
            err,
            ArticleError::MissingCredential {
                variable: TOKEN_VARIABLE
            }
        ));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = HandlerConfig {
            token: Some("  ".to_string()),
            ..HandlerConfig::default()
        };
        assert!(config.credential().is_err());
    }

    #[test]
    fn optional_token_may_be_absent() {
        let config = HandlerConfig {
            require_token: false,
            ..HandlerConfig::default()
        };
        assert_eq!(config.credential().unwrap(), None);
    }

    #[test]
    fn present_token_is_returned() {
        let config = HandlerConfig {
            token: Some("abc".to_string()),
            ..HandlerConfig::default()
        };
        assert_eq!(config.credential().unwrap(), Some("abc"));
    }

    #[test]
    fn accepts_only_configured_commands() {
        let config = HandlerConfig {
            commands: vec!["/qiita".to_string(), "/items".to_string()],
            ..HandlerConfig::default()
        };
        assert!(config.accepts("/qiita"));
        assert!(config.accepts("/items"));
        assert!(!config.accepts("/quote"));
    }
}
