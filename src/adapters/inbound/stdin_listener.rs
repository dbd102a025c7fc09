use super::slack_payload::parse_payload;
use crate::ports::inbound::CommandPort;
use crate::ports::outbound::ReplyPresenter;
use crate::shared::Result;
use futures::stream::{self, Stream, TryStreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::Instrument;
use uuid::Uuid;

/// Upper bound on commands answered at the same time
pub const MAX_CONCURRENT_REQUESTS: usize = 16;

/// Counters reported when the input stream ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenerStats {
    pub replied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ListenerStats {
    fn record(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Replied => self.replied += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Replied,
    Skipped,
    Failed,
}

/// SlackListener - answers a stream of Slack payloads
///
/// Each item is one JSON payload, read from stdin by [`SlackListener::run`]
/// or from a Socket Mode connection. Commands are handled concurrently up to
/// [`MAX_CONCURRENT_REQUESTS`]; a bad payload or a failed delivery is
/// logged and never stops the loop.
///
/// # Type Parameters
/// * `C` - CommandPort producing the reply text
/// * `P` - ReplyPresenter delivering the reply
pub struct SlackListener<C: CommandPort, P: ReplyPresenter> {
    command_port: C,
    presenter: P,
}

impl<C: CommandPort, P: ReplyPresenter> SlackListener<C, P> {
    pub fn new(command_port: C, presenter: P) -> Self {
        Self {
            command_port,
            presenter,
        }
    }

    /// Processes payloads until the reader reaches end of input
    ///
    /// # Errors
    /// Returns an error only if reading from the input fails.
    pub async fn run<R>(&self, reader: R) -> Result<ListenerStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let lines = stream::unfold(Some(reader.lines()), |state| async move {
            let Some(mut lines) = state else {
                return None;
            };
            match lines.next_line().await {
                Ok(Some(line)) => Some((Ok(line), Some(lines))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        });

        let stats = self.run_stream(lines).await?;
        tracing::info!(
            replied = stats.replied,
            skipped = stats.skipped,
            failed = stats.failed,
            "Input closed, listener stopping"
        );
        Ok(stats)
    }

    /// Processes payloads until the stream ends
    ///
    /// # Errors
    /// Returns the first error yielded by the stream.
    pub async fn run_stream<S>(&self, payloads: S) -> Result<ListenerStats>
    where
        S: Stream<Item = std::io::Result<String>>,
    {
        let stats = payloads
            .map_ok(|payload| self.handle_line(payload))
            .try_buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .try_fold(ListenerStats::default(), |stats, outcome| async move {
                Ok(stats.record(outcome))
            })
            .await?;
        Ok(stats)
    }

    async fn handle_line(&self, line: String) -> std::io::Result<Outcome> {
        let payload = line.trim();
        if payload.is_empty() {
            return Ok(Outcome::Skipped);
        }
        tracing::debug!(payload, "Received payload");

        let request = match parse_payload(payload) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(Outcome::Skipped),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding payload");
                return Ok(Outcome::Failed);
            }
        };

        let span = tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            source = %request.source
        );

        let outcome = async {
            let reply = self.command_port.respond(&request.text).await;
            match self.presenter.present(&request.reply_target, &reply).await {
                Ok(()) => Outcome::Replied,
                Err(e) => {
                    tracing::warn!(error = %format!("{:#}", e), "Failed to deliver reply");
                    Outcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }
}
