use async_trait::async_trait;
use mispbot::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock IndicatorRepository for testing
///
/// Clones share the recorded queries, so a test can keep one handle while
/// the use case owns the other.
#[derive(Clone)]
pub struct MockIndicatorRepository {
    pub events: Vec<Event>,
    pub failure: Option<fn() -> BotError>,
    pub delay: Option<Duration>,
    queries: Arc<Mutex<Vec<IndicatorQuery>>>,
}

impl MockIndicatorRepository {
    pub fn new() -> Self {
        Self {
            events: vec![],
            failure: None,
            delay: None,
            queries: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Self::new()
        }
    }

    pub fn with_failure(failure: fn() -> BotError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far, oldest first
    pub fn queries(&self) -> Vec<IndicatorQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockIndicatorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndicatorRepository for MockIndicatorRepository {
    async fn search(&self, query: &IndicatorQuery) -> Result<Vec<Event>> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = self.failure {
            return Err(failure().into());
        }
        Ok(self.events.clone())
    }
}
