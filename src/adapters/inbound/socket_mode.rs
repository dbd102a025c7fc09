use super::stdin_listener::SlackListener;
use crate::ports::inbound::CommandPort;
use crate::ports::outbound::ReplyPresenter;
use crate::shared::{BotError, Result};
use futures::stream::{self, Stream, StreamExt};
use futures::{Sink, SinkExt};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

/// SocketModeListener - receives Slack payloads over a Socket Mode websocket
///
/// The websocket URL comes from `apps.connections.open`, called with the
/// app-level token. Every envelope carrying an `envelope_id` is acknowledged
/// before its payload is handed to the [`SlackListener`], so a slow MISP
/// search never makes Slack redeliver. A `disconnect` message or a closed
/// socket opens a fresh connection.
pub struct SocketModeListener {
    client: Client,
    app_token: SecretString,
    open_url: String,
}

impl SocketModeListener {
    const OPEN_ENDPOINT: &'static str = "https://slack.com/api/apps.connections.open";
    const TIMEOUT_SECONDS: u64 = 10;
    const RECONNECT_DELAY: Duration = Duration::from_secs(1);

    pub fn new(app_token: SecretString) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("mispbot/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            app_token,
            open_url: Self::OPEN_ENDPOINT.to_string(),
        })
    }

    /// Points `apps.connections.open` calls at another endpoint
    pub fn with_open_url(mut self, open_url: impl Into<String>) -> Self {
        self.open_url = open_url.into();
        self
    }

    /// Asks Slack for a fresh websocket URL
    ///
    /// # Errors
    /// Returns `BotError::ConnectionFailed` if Slack refuses the app token.
    pub async fn open_connection(&self) -> Result<String> {
        let response = self
            .client
            .post(&self.open_url)
            .bearer_auth(self.app_token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::ConnectionFailed {
                details: format!(
                    "apps.connections.open returned status code {}",
                    response.status()
                ),
            }
            .into());
        }

        let body: OpenConnectionResponse = response.json().await?;
        match body.url {
            Some(url) if body.ok => Ok(url),
            _ => Err(BotError::ConnectionFailed {
                details: format!(
                    "apps.connections.open failed: {}",
                    body.error.as_deref().unwrap_or("no websocket url")
                ),
            }
            .into()),
        }
    }

    /// Answers payloads from Slack, reconnecting whenever a connection ends
    ///
    /// # Errors
    /// Returns an error once a new connection cannot be opened.
    pub async fn serve<C, P>(&self, listener: &SlackListener<C, P>) -> Result<()>
    where
        C: CommandPort,
        P: ReplyPresenter,
    {
        loop {
            let url = self.open_connection().await?;
            let (socket, _) = tokio_tungstenite::connect_async(url.as_str())
                .await
                .map_err(|e| BotError::ConnectionFailed {
                    details: e.to_string(),
                })?;
            tracing::info!("Socket Mode connection established");

            let stats = listener.run_stream(envelopes(socket)).await?;
            tracing::info!(
                replied = stats.replied,
                skipped = stats.skipped,
                failed = stats.failed,
                "Socket Mode connection closed, reconnecting"
            );
            tokio::time::sleep(Self::RECONNECT_DELAY).await;
        }
    }
}

/// What a websocket text frame asks the bot to do
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Hello,
    Disconnect { reason: String },
    /// Payload to answer, with the acknowledgement to send first
    Envelope { ack: Option<String>, payload: String },
}

fn classify_frame(text: &str) -> Frame {
    // Not JSON: let the listener count it as a bad payload
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return Frame::Envelope {
            ack: None,
            payload: text.to_string(),
        };
    };

    match value.get("type").and_then(Value::as_str) {
        Some("hello") => Frame::Hello,
        Some("disconnect") => Frame::Disconnect {
            reason: value
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("unspecified")
                .to_string(),
        },
        _ => Frame::Envelope {
            ack: value
                .get("envelope_id")
                .and_then(Value::as_str)
                .map(|id| serde_json::json!({ "envelope_id": id }).to_string()),
            payload: text.to_string(),
        },
    }
}

/// Acknowledges envelopes and yields their payloads until the socket ends
fn envelopes<S>(socket: S) -> impl Stream<Item = std::io::Result<String>>
where
    S: Stream<Item = std::result::Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
{
    stream::unfold(socket, |mut socket| async move {
        loop {
            let text = match socket.next().await {
                Some(Ok(Message::Text(text))) => text,
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(?frame, "Slack closed the websocket");
                    return None;
                }
                // Pings are answered by tungstenite itself
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Websocket read failed");
                    return None;
                }
                None => return None,
            };

            match classify_frame(&text) {
                Frame::Hello => tracing::debug!("Socket Mode hello received"),
                Frame::Disconnect { reason } => {
                    tracing::info!(reason = %reason, "Slack requested a reconnect");
                    return None;
                }
                Frame::Envelope { ack, payload } => {
                    if let Some(ack) = ack {
                        if let Err(e) = socket.send(Message::Text(ack)).await {
                            tracing::warn!(error = %e, "Failed to acknowledge envelope");
                            return None;
                        }
                    }
                    let item: std::io::Result<String> = Ok(payload);
                    return Some((item, socket));
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct OpenConnectionResponse {
    ok: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}
