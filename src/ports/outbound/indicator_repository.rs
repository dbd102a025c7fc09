use crate::lookup::domain::{Event, IndicatorQuery};
use crate::shared::Result;
use async_trait::async_trait;

/// IndicatorRepository port for searching the intelligence backend
///
/// This port abstracts the external data source (e.g., the MISP REST API)
/// used to find events containing an indicator.
///
/// # Async Support
/// Implementations must be `Send + Sync`: one repository instance serves
/// every concurrently handled chat command.
#[async_trait]
pub trait IndicatorRepository: Send + Sync {
    /// Searches for events that contain the queried indicator
    ///
    /// The backend match is advisory: returned events may contain attributes
    /// that do not equal the queried value. Callers filter before display.
    ///
    /// # Arguments
    /// * `query` - Indicator value, attribute types and search scope
    ///
    /// # Returns
    /// Events in backend order (possibly empty)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails or times out
    /// - The backend answers with a non-success status code
    /// - The response is not a list of events
    async fn search(&self, query: &IndicatorQuery) -> Result<Vec<Event>>;
}
