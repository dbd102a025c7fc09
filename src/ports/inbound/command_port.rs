use async_trait::async_trait;

/// CommandPort - Inbound port for answering chat commands
///
/// This port defines the interface that transport adapters (stdin listener,
/// one-shot CLI) use to get a reply for a command. It never fails: every
/// error is turned into a reply text for the user.
#[async_trait]
pub trait CommandPort: Send + Sync {
    /// Answers one command
    ///
    /// # Arguments
    /// * `raw_text` - Command text with any mention prefix already removed
    ///
    /// # Returns
    /// Exactly one reply in Slack mrkdwn
    async fn respond(&self, raw_text: &str) -> String;
}
