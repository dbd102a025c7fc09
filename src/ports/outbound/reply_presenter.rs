use crate::application::dto::ReplyTarget;
use crate::shared::Result;
use async_trait::async_trait;

/// ReplyPresenter port for delivering replies to the chat user
///
/// This port abstracts the reply destination (Slack Web API, stdout, etc.).
#[async_trait]
pub trait ReplyPresenter: Send + Sync {
    /// Delivers one reply
    ///
    /// # Arguments
    /// * `target` - Where the reply goes (channel, slash-command response URL)
    /// * `text` - The reply in Slack mrkdwn
    ///
    /// # Errors
    /// Returns an error if the destination rejects or cannot receive the reply
    async fn present(&self, target: &ReplyTarget, text: &str) -> Result<()>;
}
