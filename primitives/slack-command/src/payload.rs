//! Slash-command form payloads.

use thiserror::Error;

/// A decoded slash-command delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlashCommand {
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub channel_id: String,
    pub user_id: String,
    pub team_id: String,
    pub trigger_id: String,
}

impl SlashCommand {
    /// Text typed after the command, if any.
    pub fn query(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// What Slack posted to the command endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Certificate probe; answered with an empty 200.
    SslCheck,
    Command(SlashCommand),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("missing form field `{0}`")]
    MissingField(&'static str),
}

/// Decodes an `application/x-www-form-urlencoded` body.
pub fn parse_form(body: &[u8]) -> Result<Inbound, PayloadError> {
    let mut command = None;
    let mut parsed = SlashCommand::default();

    for (key, value) in form_urlencoded::parse(body) {
        let value = value.into_owned();
        match key.as_ref() {
            "ssl_check" => return Ok(Inbound::SslCheck),
            "command" => command = Some(value),
            "text" => parsed.text = value,
            "response_url" => parsed.response_url = value,
            "channel_id" => parsed.channel_id = value,
            "user_id" => parsed.user_id = value,
            "team_id" => parsed.team_id = value,
            "trigger_id" => parsed.trigger_id = value,
            _ => {}
        }
    }

    parsed.command = command.ok_or(PayloadError::MissingField("command"))?;
    Ok(Inbound::Command(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_command_fields() {
        let body = b"token=x&team_id=T1&channel_id=C1&user_id=U1&command=%2Fitems\
&text=java+user%3AQiita&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1&trigger_id=13.37";

        let Inbound::Command(command) = parse_form(body).unwrap() else {
            panic!("expected a command");
        };

        assert_eq!(command.command, "/items");
        assert_eq!(command.text, "java user:Qiita");
        assert_eq!(command.response_url, "https://hooks.slack.com/commands/1");
        assert_eq!(command.channel_id, "C1");
        assert_eq!(command.user_id, "U1");
        assert_eq!(command.team_id, "T1");
        assert_eq!(command.trigger_id, "13.37");
        assert_eq!(command.query(), Some("java user:Qiita"));
    }

    #[test]
    fn empty_text_has_no_query() {
        let Inbound::Command(command) = parse_form(b"command=%2Fitems&text=").unwrap() else {
            panic!("expected a command");
        };
        assert_eq!(command.query(), None);

        let Inbound::Command(command) = parse_form(b"command=%2Fitems&text=+++").unwrap() else {
            panic!("expected a command");
        };
        assert_eq!(command.query(), None);
    }

    #[test]
    fn ssl_check_is_recognised() {
        assert_eq!(
            parse_form(b"ssl_check=1&token=x").unwrap(),
            Inbound::SslCheck
        );
    }

    #[test]
    fn missing_command_is_rejected() {
        assert_eq!(
            parse_form(b"text=go").unwrap_err(),
            PayloadError::MissingField("command")
        );
    }
}
