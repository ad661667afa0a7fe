//! Port for per-user tier assignment persistence.
//!
//! The [`TierAssignmentRepository`] trait defines the contract for the
//! `user_tiers` table: one row per user, written once. Adapters must make
//! the single write race-safe (first write wins) so two concurrent first
//! logins converge on one stored tier.

use async_trait::async_trait;

use crate::domain::{Tier, TierAssignment, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tier assignment repository adapters.
    pub enum TierAssignmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tier assignment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tier assignment repository query failed: {message}",
    }
}

/// Port for tier assignment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TierAssignmentRepository: Send + Sync {
    /// Fetch the tier assignment for a user.
    ///
    /// Returns `None` when the user has not completed the selection flow.
    /// Stored values outside the catalog must be normalised by the adapter,
    /// not rejected.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<TierAssignment>, TierAssignmentRepositoryError>;

    /// Insert an assignment unless the user already holds one.
    ///
    /// Returns the assignment that is stored after the call: the new row
    /// when the insert landed, or the pre-existing row when another write
    /// won the race. Implementations must not overwrite an existing row.
    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        tier: Tier,
    ) -> Result<TierAssignment, TierAssignmentRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups report no assignment and inserts echo the requested tier back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTierAssignmentRepository;

#[async_trait]
impl TierAssignmentRepository for FixtureTierAssignmentRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<TierAssignment>, TierAssignmentRepositoryError> {
        Ok(None)
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        tier: Tier,
    ) -> Result<TierAssignment, TierAssignmentRepositoryError> {
        Ok(TierAssignment {
            user_id: user_id.clone(),
            tier,
        })
    }
}
