use crate::lookup::domain::{decode_events, Event, IndicatorQuery};
use crate::ports::outbound::IndicatorRepository;
use crate::shared::{BotError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

/// MISP REST client for indicator searches
///
/// Searches go to `POST {server}/events/restSearch`, authenticated with the
/// automation key in the `Authorization` header.
///
/// # Security
/// - TLS certificates are verified unless explicitly disabled in settings
/// - Requests time out (default 30 seconds)
/// - Failed requests are not retried; the chat user gets the error report
pub struct MispClient {
    client: Client,
    search_url: String,
    api_key: SecretString,
    timeout: Duration,
}

impl MispClient {
    const SEARCH_PATH: &'static str = "events/restSearch";

    /// Creates a new MISP client
    ///
    /// # Arguments
    /// * `server_url` - Base URL of the MISP instance (trailing slash optional)
    /// * `api_key` - MISP automation key
    /// * `verify_cert` - Whether to verify the server's TLS certificate
    /// * `timeout` - Request timeout
    pub fn new(
        server_url: &str,
        api_key: SecretString,
        verify_cert: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("mispbot/{}", version);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(!verify_cert)
            .build()?;

        if !verify_cert {
            tracing::warn!("TLS certificate verification is disabled for MISP requests");
        }

        Ok(Self {
            client,
            search_url: Self::search_url(server_url),
            api_key,
            timeout,
        })
    }

    fn search_url(server_url: &str) -> String {
        let base = server_url.trim().trim_end_matches('/');
        format!("{}/{}", base, Self::SEARCH_PATH)
    }

    fn build_request<'a>(query: &'a IndicatorQuery) -> RestSearchRequest<'a> {
        let constraints = query.constraints();
        RestSearchRequest {
            return_format: "json",
            value: query.value(),
            attribute_types: query.attribute_types(),
            limit: constraints.limit,
            published: constraints.published,
            to_ids: constraints.to_ids,
            deleted: constraints.deleted,
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> BotError {
        if error.is_timeout() {
            BotError::BackendTimeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            BotError::BackendUnavailable {
                details: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl IndicatorRepository for MispClient {
    async fn search(&self, query: &IndicatorQuery) -> Result<Vec<Event>> {
        let body = Self::build_request(query);
        tracing::debug!(url = %self.search_url, value = query.value(), "Sending MISP search");

        let response = self
            .client
            .post(&self.search_url)
            .header(AUTHORIZATION, self.api_key.expose_secret())
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(BotError::BackendUnavailable {
                details: format!("MISP returned status code {}", response.status()),
            }
            .into());
        }

        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| BotError::MalformedResponse {
                    details: format!("response body is not JSON: {}", e),
                })?;

        Ok(decode_events(payload)?)
    }
}

// MISP API request structure

#[derive(Debug, Serialize)]
struct RestSearchRequest<'a> {
    #[serde(rename = "returnFormat")]
    return_format: &'static str,
    value: &'a str,
    #[serde(rename = "type")]
    attribute_types: &'a [&'a str],
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_ids: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}
