//! Slack mrkdwn primitives used in replies.
//!
//! The glyphs and wrappers are part of what the chat client renders, so they
//! are kept as literal strings.

/// Leading glyph for list items and header fields
pub const BULLET: &str = ":black_small_square:";

/// Separator between fields of an attribute line
pub const FIELD_SEPARATOR: &str = ":white_small_square:";

pub fn bold(text: &str) -> String {
    format!("*{}*", text)
}

/// De-emphasized (struck-through) text
pub fn strike(text: &str) -> String {
    format!("~{}~", text)
}

pub fn link(url: &str, label: &str) -> String {
    format!("<{}|{}>", url, label)
}

/// Date token rendered by the client in the reader's locale
///
/// `fallback` is shown by clients that cannot render date tokens.
pub fn date_token(epoch_seconds: i64, fallback: &str) -> String {
    format!(
        "<!date^{}^{{date_num}} {{time}}|{}>",
        epoch_seconds, fallback
    )
}
