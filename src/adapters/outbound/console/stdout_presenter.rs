use crate::application::dto::ReplyTarget;
use crate::ports::outbound::ReplyPresenter;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::io::{self, Write};

/// StdoutPresenter adapter for printing replies instead of posting them
///
/// Each reply is written as one JSON line carrying its target, so a dry run
/// can be inspected or piped into other tools. Concurrent replies never
/// interleave because stdout is locked per line.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_line(target: &ReplyTarget, text: &str) -> Result<String> {
        let line = match target {
            ReplyTarget::Channel(channel) => ReplyLine {
                channel: Some(channel),
                response_url: None,
                text,
            },
            ReplyTarget::ResponseUrl(url) => ReplyLine {
                channel: None,
                response_url: Some(url),
                text,
            },
        };
        Ok(serde_json::to_string(&line)?)
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyPresenter for StdoutPresenter {
    async fn present(&self, target: &ReplyTarget, text: &str) -> Result<()> {
        let line = Self::render_line(target, text)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ReplyLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_url: Option<&'a str>,
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_channel_reply() {
        let line =
            StdoutPresenter::render_line(&ReplyTarget::Channel("C0123".to_string()), "*hi*\nthere")
                .unwrap();
        assert_eq!(line, r#"{"channel":"C0123","text":"*hi*\nthere"}"#);
    }

    #[test]
    fn test_render_response_url_reply() {
        let line = StdoutPresenter::render_line(
            &ReplyTarget::ResponseUrl("https://hooks.slack.com/commands/1".to_string()),
            "No results found",
        )
        .unwrap();
        assert_eq!(
            line,
            r#"{"response_url":"https://hooks.slack.com/commands/1","text":"No results found"}"#
        );
    }

    #[tokio::test]
    async fn test_stdout_presenter() {
        let presenter = StdoutPresenter::default();
        let result = presenter
            .present(&ReplyTarget::Channel("C0123".to_string()), "test output")
            .await;
        assert!(result.is_ok());
    }
}
