use std::fmt;

/// Where a reply should be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Post into a channel; mentions and direct messages answer here
    Channel(String),
    /// Slash-command response URL; only the invoking user sees the reply
    ResponseUrl(String),
}

/// How the command reached the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    DirectMessage,
    Mention,
    SlashCommand,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestSource::DirectMessage => write!(f, "message"),
            RequestSource::Mention => write!(f, "app_mention"),
            RequestSource::SlashCommand => write!(f, "slash_command"),
        }
    }
}

/// InboundRequest - a chat command extracted from a transport payload
///
/// `text` is ready for routing: mention prefixes are already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub text: String,
    pub source: RequestSource,
    pub reply_target: ReplyTarget,
}

impl InboundRequest {
    pub fn new(text: String, source: RequestSource, reply_target: ReplyTarget) -> Self {
        Self {
            text,
            source,
            reply_target,
        }
    }
}
