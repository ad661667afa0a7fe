//! PostgreSQL-backed `TierAssignmentRepository` implementation using Diesel.
//!
//! This adapter implements the domain's `TierAssignmentRepository` port. The
//! one-time write is made race-safe with `ON CONFLICT DO NOTHING` on the
//! `user_id` primary key followed by a re-read, so concurrent first
//! selections converge on a single stored tier.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TierAssignmentRepository, TierAssignmentRepositoryError};
use crate::domain::{Tier, TierAssignment, UserId};

use super::models::{NewUserTierRow, UserTierRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_tiers;

/// Diesel-backed implementation of the `TierAssignmentRepository` port.
#[derive(Clone)]
pub struct DieselTierAssignmentRepository {
    pool: DbPool,
}

impl DieselTierAssignmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain tier assignment repository errors.
fn map_pool_error(error: PoolError) -> TierAssignmentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TierAssignmentRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain tier assignment repository errors.
fn map_diesel_error(error: diesel::result::Error) -> TierAssignmentRepositoryError {
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
            TierAssignmentRepositoryError::connection("database connection error")
        }
        _ => TierAssignmentRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain [`TierAssignment`].
///
/// Stored values outside the catalog are normalised downwards (fail closed)
/// rather than rejected, so a malformed row cannot lock its owner out.
fn row_to_assignment(row: UserTierRow) -> TierAssignment {
    let tier = row.tier.parse::<Tier>().unwrap_or_else(|_| {
        let normalised = Tier::normalise(&row.tier);
        tracing::warn!(
            value = row.tier,
            user_id = %row.user_id,
            normalised = normalised.as_str(),
            "stored tier outside the catalog, normalised"
        );
        normalised
    });

    TierAssignment {
        user_id: UserId::from_uuid(row.user_id),
        tier,
    }
}

#[async_trait]
impl TierAssignmentRepository for DieselTierAssignmentRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<TierAssignment>, TierAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserTierRow> = user_tiers::table
            .filter(user_tiers::user_id.eq(user_id.as_uuid()))
            .select(UserTierRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_assignment))
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        tier: Tier,
    ) -> Result<TierAssignment, TierAssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserTierRow {
            user_id: *user_id.as_uuid(),
            tier: tier.as_str(),
        };

        // First write wins: a concurrent insert leaves the existing row
        // untouched and this statement affects zero rows.
        diesel::insert_into(user_tiers::table)
            .values(&new_row)
            .on_conflict(user_tiers::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let stored: UserTierRow = user_tiers::table
            .filter(user_tiers::user_id.eq(user_id.as_uuid()))
            .select(UserTierRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_assignment(stored))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sample_row(tier: &str) -> UserTierRow {
        UserTierRow {
            user_id: uuid::Uuid::new_v4(),
            tier: tier.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            TierAssignmentRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(
            repo_err,
            TierAssignmentRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    #[case::silver("silver", Tier::Silver)]
    #[case::platinum("platinum", Tier::Platinum)]
    #[case::mixed_case("Platinum", Tier::Platinum)]
    fn row_to_assignment_parses_stored_tiers(#[case] stored: &str, #[case] expected: Tier) {
        let assignment = row_to_assignment(sample_row(stored));
        assert_eq!(assignment.tier, expected);
    }

    #[rstest]
    #[case::unknown("diamond")]
    #[case::empty("")]
    fn row_to_assignment_fails_closed_on_unknown_tiers(#[case] stored: &str) {
        let assignment = row_to_assignment(sample_row(stored));
        assert_eq!(assignment.tier, Tier::Free);
    }
}
