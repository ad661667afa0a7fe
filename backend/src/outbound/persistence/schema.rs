//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate these definitions with
//! `diesel print-schema` or update them by hand to match.

diesel::table! {
    /// Showcase events table.
    ///
    /// Each row is an event gated by a minimum tier. The `id` column is the
    /// primary key (UUID v4).
    events (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short headline (max 200 characters).
        title -> Varchar,
        /// Longer description shown on the event card.
        description -> Text,
        /// Minimum tier required to view the event (lowercase name).
        tier -> Varchar,
        /// Calendar date, when known.
        event_date -> Nullable<Date>,
        /// Image reference for the event card, when present.
        image_url -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-time tier assignments table.
    ///
    /// One row per user, keyed by `user_id`, written once by the selection
    /// flow. First write wins; later writes must not overwrite.
    user_tiers (user_id) {
        /// Primary key: the owning user's UUID.
        user_id -> Uuid,
        /// Assigned tier (lowercase name).
        tier -> Varchar,
        /// Timestamp of the winning selection.
        created_at -> Timestamptz,
    }
}
