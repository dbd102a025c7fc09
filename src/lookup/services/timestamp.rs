use super::mrkdwn;
use chrono::DateTime;

/// Fallback text when the epoch value is outside chrono's range
const UNRENDERABLE_FALLBACK: &str = "timestamp";

/// Formats epoch seconds as a Slack date token
///
/// The fallback text is the UTC time, e.g.
/// `<!date^1700000000^{date_num} {time}|2023-11-14 22:13:20 UTC>`.
pub fn format_timestamp(epoch_seconds: i64) -> String {
    let fallback = DateTime::from_timestamp(epoch_seconds, 0)
        .map(|utc| utc.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| UNRENDERABLE_FALLBACK.to_string());

    mrkdwn::date_token(epoch_seconds, &fallback)
}
