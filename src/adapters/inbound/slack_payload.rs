use crate::application::dto::{InboundRequest, ReplyTarget, RequestSource};
use crate::shared::{BotError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Parses one Slack payload into a routable request
///
/// Accepts Events API callbacks, slash-command bodies and both of these
/// wrapped in a Socket Mode envelope. Returns `Ok(None)` for payloads the
/// bot does not answer (handshakes, bot echoes, unsupported event types).
///
/// # Errors
/// Returns `BotError::InvalidPayload` if the line is not JSON or a
/// recognised payload is missing required fields.
pub fn parse_payload(line: &str) -> Result<Option<InboundRequest>> {
    let value: Value = serde_json::from_str(line).map_err(|e| BotError::InvalidPayload {
        details: format!("not valid JSON: {}", e),
    })?;

    Ok(parse_value(value)?)
}

fn parse_value(value: Value) -> std::result::Result<Option<InboundRequest>, BotError> {
    let payload_type = value.get("type").and_then(Value::as_str).unwrap_or_default();

    match payload_type {
        // Socket Mode envelopes carry the real payload one level down
        "events_api" | "slash_commands" => match value.get("payload") {
            Some(inner) => parse_value(inner.clone()),
            None => Err(BotError::InvalidPayload {
                details: format!("{} envelope without payload", payload_type),
            }),
        },
        "event_callback" => {
            let callback: EventCallback = decode(value)?;
            Ok(callback.event.into_request())
        }
        _ if value.get("command").is_some() => {
            let command: SlashCommand = decode(value)?;
            Ok(Some(command.into_request()))
        }
        other => {
            tracing::debug!(payload_type = other, "Skipping unsupported payload");
            Ok(None)
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> std::result::Result<T, BotError> {
    serde_json::from_value(value).map_err(|e| BotError::InvalidPayload {
        details: e.to_string(),
    })
}

/// Removes the leading `<@BOTID>` token of an app mention
fn strip_mention(text: &str) -> &str {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("<@") {
        return text;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((_, rest)) => rest,
        None => "",
    }
}

// Slack payload structures

#[derive(Debug, Deserialize)]
struct EventCallback {
    event: SlackEvent,
}

#[derive(Debug, Deserialize)]
struct SlackEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    bot_id: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
}

impl SlackEvent {
    fn into_request(self) -> Option<InboundRequest> {
        if self.bot_id.is_some() || self.subtype.is_some() {
            tracing::debug!(
                event_type = %self.event_type,
                subtype = self.subtype.as_deref().unwrap_or_default(),
                "Ignoring bot or system event"
            );
            return None;
        }

        let source = match self.event_type.as_str() {
            "message" => RequestSource::DirectMessage,
            "app_mention" => RequestSource::Mention,
            other => {
                tracing::debug!(event_type = other, "Skipping unsupported event");
                return None;
            }
        };

        let Some(channel) = self.channel else {
            tracing::debug!(event_type = %self.event_type, "Skipping event without channel");
            return None;
        };

        let text = match source {
            RequestSource::Mention => strip_mention(&self.text).to_string(),
            _ => self.text,
        };

        Some(InboundRequest::new(text, source, ReplyTarget::Channel(channel)))
    }
}

#[derive(Debug, Deserialize)]
struct SlashCommand {
    #[serde(default)]
    text: String,
    response_url: String,
}

impl SlashCommand {
    fn into_request(self) -> InboundRequest {
        InboundRequest::new(
            self.text,
            RequestSource::SlashCommand,
            ReplyTarget::ResponseUrl(self.response_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Option<InboundRequest> {
        parse_payload(&value.to_string()).unwrap()
    }

    #[test]
    fn test_app_mention_strips_mention_token() {
        let request = parse(json!({
            "type": "event_callback",
            "event": {
                "type": "app_mention",
                "text": "<@U0BOT> searchip 1.2.3.4",
                "channel": "C0123",
                "user": "U0HUMAN"
            }
        }))
        .unwrap();

        assert_eq!(request.text, "searchip 1.2.3.4");
        assert_eq!(request.source, RequestSource::Mention);
        assert_eq!(request.reply_target, ReplyTarget::Channel("C0123".to_string()));
    }

    #[test]
    fn test_bare_mention_yields_empty_text() {
        let request = parse(json!({
            "type": "event_callback",
            "event": {"type": "app_mention", "text": "<@U0BOT>", "channel": "C0123"}
        }))
        .unwrap();
        assert_eq!(request.text, "");
    }

    #[test]
    fn test_message_text_used_as_is() {
        let request = parse(json!({
            "type": "event_callback",
            "event": {"type": "message", "text": "help", "channel": "D0123", "channel_type": "im"}
        }))
        .unwrap();

        assert_eq!(request.text, "help");
        assert_eq!(request.source, RequestSource::DirectMessage);
        assert_eq!(request.reply_target, ReplyTarget::Channel("D0123".to_string()));
    }

    #[test]
    fn test_bot_events_are_ignored() {
        let echo = json!({
            "type": "event_callback",
            "event": {"type": "message", "text": "No results found", "channel": "C0123", "bot_id": "B0BOT"}
        });
        assert!(parse(echo).is_none());

        let edit = json!({
            "type": "event_callback",
            "event": {"type": "message", "subtype": "message_changed", "channel": "C0123"}
        });
        assert!(parse(edit).is_none());
    }

    #[test]
    fn test_slash_command_replies_to_response_url() {
        let request = parse(json!({
            "command": "/mispbot",
            "text": "searchipext 10.0.0.1",
            "response_url": "https://hooks.slack.com/commands/T0/1/abc",
            "channel_id": "C0123"
        }))
        .unwrap();

        assert_eq!(request.text, "searchipext 10.0.0.1");
        assert_eq!(request.source, RequestSource::SlashCommand);
        assert_eq!(
            request.reply_target,
            ReplyTarget::ResponseUrl("https://hooks.slack.com/commands/T0/1/abc".to_string())
        );
    }

    #[test]
    fn test_socket_mode_envelopes() {
        let events = parse(json!({
            "type": "events_api",
            "envelope_id": "1",
            "payload": {
                "type": "event_callback",
                "event": {"type": "app_mention", "text": "<@U0BOT> help", "channel": "C0123"}
            }
        }))
        .unwrap();
        assert_eq!(events.text, "help");

        let slash = parse(json!({
            "type": "slash_commands",
            "envelope_id": "2",
            "payload": {"command": "/mispbot", "text": "help", "response_url": "https://example.org/r"}
        }))
        .unwrap();
        assert_eq!(slash.source, RequestSource::SlashCommand);
    }

    #[test]
    fn test_handshakes_are_skipped() {
        assert!(parse(json!({"type": "hello", "num_connections": 1})).is_none());
        assert!(parse(json!({"type": "url_verification", "challenge": "abc"})).is_none());
        assert!(parse(json!({
            "type": "event_callback",
            "event": {"type": "reaction_added", "channel": "C0123"}
        }))
        .is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let error = parse_payload("{not json").unwrap_err();
        assert!(matches!(
            error.downcast::<BotError>().unwrap(),
            BotError::InvalidPayload { .. }
        ));
    }

    #[test]
    fn test_slash_command_without_response_url_is_an_error() {
        let error = parse_payload(r#"{"command": "/mispbot", "text": "help"}"#).unwrap_err();
        assert!(error.to_string().contains("Invalid inbound payload"));
    }

    #[test]
    fn test_strip_mention() {
        assert_eq!(strip_mention("<@U0BOT> searchip 1.2.3.4"), "searchip 1.2.3.4");
        assert_eq!(strip_mention("searchip 1.2.3.4"), "searchip 1.2.3.4");
        assert_eq!(strip_mention("<@U0BOT>"), "");
    }
}
