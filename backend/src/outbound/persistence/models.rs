//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{events, user_tiers};

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tier: String,
    pub event_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub tier: &'a str,
    pub event_date: Option<NaiveDate>,
    pub image_url: Option<&'a str>,
}

/// Changeset struct for replacing existing event records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = events)]
pub(crate) struct EventChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tier: &'a str,
    pub event_date: Option<Option<NaiveDate>>,
    pub image_url: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tier assignment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the user_tiers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_tiers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserTierRow {
    pub user_id: Uuid,
    pub tier: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for the one-time tier selection.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_tiers)]
pub(crate) struct NewUserTierRow<'a> {
    pub user_id: Uuid,
    pub tier: &'a str,
}
