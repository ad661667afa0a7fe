//! Driving ports for the event showcase.
//!
//! Split into a query side (visibility-filtered listing, available to any
//! viewer) and a command side (create/update/delete, administrator only).

use async_trait::async_trait;

use crate::domain::{Error, Event, EventDraft, EventId, TierFilter, Viewer};

/// Driving port: read the showcase as a given viewer.
#[async_trait]
pub trait ShowcaseQuery: Send + Sync {
    /// List the events the viewer may see, narrowed by the display filter.
    async fn list(&self, viewer: Viewer, filter: TierFilter) -> Result<Vec<Event>, Error>;
}

/// Driving port: administrator mutations on the showcase.
///
/// Every operation fails with a `forbidden` error unless the viewer holds
/// the administrator capability. This is the client-side gate; storage-side
/// enforcement belongs to the collaborator.
#[async_trait]
pub trait ShowcaseCommand: Send + Sync {
    /// Create an event from a validated draft.
    async fn create(&self, viewer: Viewer, draft: EventDraft) -> Result<Event, Error>;

    /// Replace an existing event with a validated draft.
    async fn update(&self, viewer: Viewer, id: EventId, draft: EventDraft)
    -> Result<Event, Error>;

    /// Delete an event.
    async fn delete(&self, viewer: Viewer, id: EventId) -> Result<(), Error>;
}

/// Fixture query implementation returning an empty showcase.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShowcaseQuery;

#[async_trait]
impl ShowcaseQuery for FixtureShowcaseQuery {
    async fn list(&self, _viewer: Viewer, _filter: TierFilter) -> Result<Vec<Event>, Error> {
        Ok(Vec::new())
    }
}

/// Fixture command implementation that echoes drafts back as events.
///
/// The administrator gate still applies, so handler tests exercise the
/// forbidden path without storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShowcaseCommand;

#[async_trait]
impl ShowcaseCommand for FixtureShowcaseCommand {
    async fn create(&self, viewer: Viewer, draft: EventDraft) -> Result<Event, Error> {
        if !viewer.is_administrator() {
            return Err(Error::forbidden("administrator capability required"));
        }
        draft
            .into_event()
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn update(
        &self,
        viewer: Viewer,
        id: EventId,
        draft: EventDraft,
    ) -> Result<Event, Error> {
        if !viewer.is_administrator() {
            return Err(Error::forbidden("administrator capability required"));
        }
        draft
            .into_event_with_id(id)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn delete(&self, viewer: Viewer, _id: EventId) -> Result<(), Error> {
        if !viewer.is_administrator() {
            return Err(Error::forbidden("administrator capability required"));
        }
        Ok(())
    }
}
