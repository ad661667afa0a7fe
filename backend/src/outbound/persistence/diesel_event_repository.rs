//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `EventRepository` port, providing
//! durable storage for showcase events. Visibility filtering stays in the
//! domain; the adapter reads and writes whole records.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use url::Url;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, EventId, Tier};

use super::models::{EventChanges, EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain event repository errors.
fn map_pool_error(error: PoolError) -> EventRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EventRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain event repository errors.
fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EventRepositoryError::connection("database connection error")
        }
        _ => EventRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain [`Event`].
///
/// Stored values outside the catalog are normalised downwards rather than
/// rejected, so one bad row cannot take the whole listing down.
fn row_to_event(row: EventRow) -> Event {
    let tier = row.tier.parse::<Tier>().unwrap_or_else(|_| {
        let normalised = Tier::normalise(&row.tier);
        tracing::warn!(
            value = row.tier,
            event_id = %row.id,
            normalised = normalised.as_str(),
            "stored tier outside the catalog, normalised"
        );
        normalised
    });
    let image_url = row.image_url.and_then(|raw| match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(_) => {
            tracing::warn!(event_id = %row.id, "malformed image URL in storage, dropping");
            None
        }
    });

    Event {
        id: EventId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        tier,
        event_date: row.event_date,
        image_url,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn list(&self) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .order(events::event_date.asc())
            .then_order_by(events::title.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_event).collect())
    }

    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let image_url = event.image_url.as_ref().map(Url::as_str);
        let new_row = NewEventRow {
            id: *event.id.as_uuid(),
            title: &event.title,
            description: &event.description,
            tier: event.tier.as_str(),
            event_date: event.event_date,
            image_url,
        };

        diesel::insert_into(events::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let image_url = event.image_url.as_ref().map(Url::as_str);
        // Some(None) forces NULL writes so a replace clears dropped fields.
        let changes = EventChanges {
            title: &event.title,
            description: &event.description,
            tier: event.tier.as_str(),
            event_date: Some(event.event_date),
            image_url: Some(image_url),
            updated_at: event.updated_at,
        };

        let updated_rows = diesel::update(events::table)
            .filter(events::id.eq(event.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(EventRepositoryError::not_found(event.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(events::table.filter(events::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted_rows == 0 {
            return Err(EventRepositoryError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sample_row(tier: &str, image_url: Option<&str>) -> EventRow {
        EventRow {
            id: uuid::Uuid::new_v4(),
            title: "Launch night".to_owned(),
            description: "Doors at 7".to_owned(),
            tier: tier.to_owned(),
            event_date: None,
            image_url: image_url.map(str::to_owned),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, EventRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, EventRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case::free("free", Tier::Free)]
    #[case::gold("gold", Tier::Gold)]
    #[case::mixed_case("Platinum", Tier::Platinum)]
    fn row_to_event_parses_stored_tiers(#[case] stored: &str, #[case] expected: Tier) {
        let event = row_to_event(sample_row(stored, None));
        assert_eq!(event.tier, expected);
    }

    #[rstest]
    fn row_to_event_defaults_unknown_tiers_to_free() {
        let event = row_to_event(sample_row("diamond", None));
        assert_eq!(event.tier, Tier::Free);
    }

    #[rstest]
    fn row_to_event_drops_malformed_image_urls() {
        let event = row_to_event(sample_row("free", Some("not a url")));
        assert!(event.image_url.is_none());
    }

    #[rstest]
    fn row_to_event_keeps_well_formed_image_urls() {
        let event = row_to_event(sample_row("free", Some("https://cdn.example.com/a.jpg")));
        assert_eq!(
            event.image_url.as_ref().map(Url::as_str),
            Some("https://cdn.example.com/a.jpg")
        );
    }
}
