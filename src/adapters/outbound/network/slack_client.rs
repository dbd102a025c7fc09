use crate::application::dto::ReplyTarget;
use crate::ports::outbound::ReplyPresenter;
use crate::shared::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SlackWebPresenter adapter for posting replies through the Slack Web API
///
/// Channel replies use `chat.postMessage` with the bot token. Slash-command
/// replies are posted to the command's `response_url` as ephemeral messages.
pub struct SlackWebPresenter {
    client: Client,
    bot_token: SecretString,
    api_url: String,
}

impl SlackWebPresenter {
    const API_ENDPOINT: &'static str = "https://slack.com/api/chat.postMessage";
    const TIMEOUT_SECONDS: u64 = 10;

    pub fn new(bot_token: SecretString) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("mispbot/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            bot_token,
            api_url: Self::API_ENDPOINT.to_string(),
        })
    }

    /// Points `chat.postMessage` calls at another endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn post_to_channel(&self, channel: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.bot_token.expose_secret())
            .json(&PostMessage { channel, text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::ReplyFailed {
                details: format!("chat.postMessage returned status code {}", response.status()),
            }
            .into());
        }

        // The Web API reports most failures as 200 with "ok": false
        let body: SlackApiResponse = response.json().await?;
        if !body.ok {
            return Err(BotError::ReplyFailed {
                details: format!(
                    "chat.postMessage failed: {}",
                    body.error.as_deref().unwrap_or("unknown error")
                ),
            }
            .into());
        }

        Ok(())
    }

    async fn post_to_response_url(&self, response_url: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(response_url)
            .json(&SlashResponse {
                response_type: "ephemeral",
                text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::ReplyFailed {
                details: format!("response_url returned status code {}", response.status()),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl ReplyPresenter for SlackWebPresenter {
    async fn present(&self, target: &ReplyTarget, text: &str) -> Result<()> {
        match target {
            ReplyTarget::Channel(channel) => self.post_to_channel(channel, text).await,
            ReplyTarget::ResponseUrl(url) => self.post_to_response_url(url, text).await,
        }
    }
}

// Slack Web API request/response structures

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SlashResponse<'a> {
    response_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}
