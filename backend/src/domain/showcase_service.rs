//! Event showcase domain service.
//!
//! Implements the [`ShowcaseQuery`] and [`ShowcaseCommand`] driving ports
//! over the event repository, applying the visibility policy on reads and
//! the administrator gate on writes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    EventRepository, EventRepositoryError, ShowcaseCommand, ShowcaseQuery,
};
use crate::domain::visibility::{apply_filter, visible_events};
use crate::domain::{Error, Event, EventDraft, EventId, TierFilter, Viewer};

/// Event showcase service implementing the driving ports.
#[derive(Clone)]
pub struct ShowcaseService<E> {
    events: Arc<E>,
}

impl<E> ShowcaseService<E> {
    /// Create a new service over the given repository.
    pub fn new(events: Arc<E>) -> Self {
        Self { events }
    }
}

impl<E> ShowcaseService<E>
where
    E: EventRepository,
{
    fn map_repository_error(error: EventRepositoryError) -> Error {
        match error {
            EventRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("event repository unavailable: {message}"))
            }
            EventRepositoryError::Query { message } => {
                Error::internal(format!("event repository error: {message}"))
            }
            EventRepositoryError::NotFound { id } => {
                Error::not_found(format!("event not found: {id}"))
            }
        }
    }

    fn require_administrator(viewer: Viewer) -> Result<(), Error> {
        if viewer.is_administrator() {
            Ok(())
        } else {
            Err(Error::forbidden("administrator capability required"))
        }
    }

    fn map_draft_error(error: crate::domain::EventValidationError) -> Error {
        Error::invalid_request(error.to_string())
    }
}

#[async_trait]
impl<E> ShowcaseQuery for ShowcaseService<E>
where
    E: EventRepository,
{
    async fn list(&self, viewer: Viewer, filter: TierFilter) -> Result<Vec<Event>, Error> {
        let all = self
            .events
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(apply_filter(filter, visible_events(viewer, &all)))
    }
}

#[async_trait]
impl<E> ShowcaseCommand for ShowcaseService<E>
where
    E: EventRepository,
{
    async fn create(&self, viewer: Viewer, draft: EventDraft) -> Result<Event, Error> {
        Self::require_administrator(viewer)?;
        let event = draft.into_event().map_err(Self::map_draft_error)?;
        self.events
            .insert(&event)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(event)
    }

    async fn update(
        &self,
        viewer: Viewer,
        id: EventId,
        draft: EventDraft,
    ) -> Result<Event, Error> {
        Self::require_administrator(viewer)?;
        let event = draft.into_event_with_id(id).map_err(Self::map_draft_error)?;
        self.events
            .update(&event)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(event)
    }

    async fn delete(&self, viewer: Viewer, id: EventId) -> Result<(), Error> {
        Self::require_administrator(viewer)?;
        self.events
            .delete(&id)
            .await
            .map_err(Self::map_repository_error)
    }
}
