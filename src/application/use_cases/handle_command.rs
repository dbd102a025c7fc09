use crate::application::messages;
use crate::lookup::domain::{Command, CommandKind, IndicatorQuery, SearchResult, SearchScope};
use crate::lookup::services::{CommandRouter, ResultRenderer};
use crate::ports::inbound::CommandPort;
use crate::ports::outbound::IndicatorRepository;
use crate::shared::BotError;
use async_trait::async_trait;
use std::time::Duration;

/// Upper bound for one backend search when nothing else is configured
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HandleCommandUseCase - answers one chat command
///
/// Routes the text, enforces argument requirements, runs the backend search
/// for search commands and renders the result. Every path produces exactly
/// one reply; backend failures become the fixed error report.
///
/// # Type Parameters
/// * `R` - IndicatorRepository implementation
pub struct HandleCommandUseCase<R: IndicatorRepository> {
    indicator_repository: R,
    renderer: ResultRenderer,
    search_timeout: Duration,
}

impl<R: IndicatorRepository> HandleCommandUseCase<R> {
    /// Creates a new HandleCommandUseCase with injected dependencies
    ///
    /// # Arguments
    /// * `indicator_repository` - Backend used by the search commands
    /// * `renderer` - Renderer linking events to the configured MISP instance
    /// * `search_timeout` - Limit for a single backend search
    pub fn new(indicator_repository: R, renderer: ResultRenderer, search_timeout: Duration) -> Self {
        Self {
            indicator_repository,
            renderer,
            search_timeout,
        }
    }

    /// Executes the command and returns the reply text
    pub async fn execute(&self, raw_text: &str) -> String {
        let command = CommandRouter::route(raw_text);
        let kind = command.kind();

        tracing::info!(
            keyword = command.keyword(),
            arguments = command.arguments().len(),
            "Handling command"
        );

        // Checked before dispatch so no handler runs without its arguments
        if command.is_missing_arguments() {
            return messages::MISSING_PARAMETERS.to_string();
        }

        match kind {
            CommandKind::Help | CommandKind::Test => messages::HELP_TEXT.to_string(),
            CommandKind::SearchIp(scope) => self.search_ip(&command, scope).await,
            CommandKind::SearchDomain => messages::SEARCH_DOMAIN_NOT_IMPLEMENTED.to_string(),
            CommandKind::Unknown => messages::INVALID_COMMAND.to_string(),
        }
    }

    async fn search_ip(&self, command: &Command, scope: SearchScope) -> String {
        let Some(value) = command.first_argument() else {
            return messages::MISSING_PARAMETERS.to_string();
        };

        let query = IndicatorQuery::ip(value, scope);
        let result = self.search(&query).await;

        let mut reply = messages::search_header(command.raw_text());
        reply.push_str(&self.renderer.render(&result, &query));
        reply
    }

    /// Runs the backend search under the configured timeout
    async fn search(&self, query: &IndicatorQuery) -> SearchResult {
        let search = self.indicator_repository.search(query);

        match tokio::time::timeout(self.search_timeout, search).await {
            Ok(Ok(events)) => {
                tracing::debug!(events = events.len(), "MISP search completed");
                Ok(events)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %format!("{:#}", e), "MISP search failed");
                Err(match e.downcast::<BotError>() {
                    Ok(bot_error) => bot_error,
                    Err(other) => BotError::BackendUnavailable {
                        details: format!("{:#}", other),
                    },
                })
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.search_timeout.as_secs(),
                    "MISP search timed out"
                );
                Err(BotError::BackendTimeout {
                    seconds: self.search_timeout.as_secs(),
                })
            }
        }
    }
}

#[async_trait]
impl<R: IndicatorRepository> CommandPort for HandleCommandUseCase<R> {
    async fn respond(&self, raw_text: &str) -> String {
        self.execute(raw_text).await
    }
}
