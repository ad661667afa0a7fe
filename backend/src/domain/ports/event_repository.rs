//! Port for showcase event persistence.
//!
//! The [`EventRepository`] trait defines the contract for reading and
//! mutating event records. Adapters implement this trait to provide durable
//! storage (e.g., PostgreSQL). Mutations are only issued after the inbound
//! layer has confirmed the administrator capability; storage-side
//! enforcement remains the collaborator's responsibility.

use async_trait::async_trait;

use crate::domain::{Event, EventId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "event repository query failed: {message}",
        /// The targeted event does not exist.
        NotFound { id: String } =>
            "event not found: {id}",
    }
}

/// Port for event storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetch the full event collection.
    ///
    /// Visibility filtering happens in the domain; the repository returns
    /// every stored event.
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError>;

    /// Insert a new event record.
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Replace an existing event record.
    ///
    /// Fails with [`EventRepositoryError::NotFound`] when no record carries
    /// the event's identifier.
    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Delete an event record.
    ///
    /// Fails with [`EventRepositoryError::NotFound`] when no record carries
    /// the identifier.
    async fn delete(&self, id: &EventId) -> Result<(), EventRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return an empty collection and mutations are discarded. Use it in
/// tests where event storage is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEventRepository;

#[async_trait]
impl EventRepository for FixtureEventRepository {
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _event: &Event) -> Result<(), EventRepositoryError> {
        Ok(())
    }

    async fn update(&self, _event: &Event) -> Result<(), EventRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: &EventId) -> Result<(), EventRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventDraft, Tier};
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_lists_nothing() {
        let repo = FixtureEventRepository;
        let events = repo.list().await.expect("fixture list should succeed");
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn fixture_repository_accepts_mutations() {
        let repo = FixtureEventRepository;
        let event = EventDraft::new("Title", "desc", Tier::Free)
            .into_event()
            .expect("valid draft");

        repo.insert(&event).await.expect("insert accepted");
        repo.update(&event).await.expect("update accepted");
        repo.delete(&event.id).await.expect("delete accepted");
    }

    #[rstest]
    fn not_found_error_names_the_identifier() {
        let error = EventRepositoryError::not_found("abc-123");
        assert!(error.to_string().contains("abc-123"));
    }
}
