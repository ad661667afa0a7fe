//! Tier selection domain service.
//!
//! Implements the [`TierSelection`] driving port over the assignment
//! repository, enforcing the one-time, first-write-wins semantics of the
//! selection flow.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    TierAssignmentRepository, TierAssignmentRepositoryError, TierSelection,
};
use crate::domain::{Error, Tier, TierAssignment, TierAssignmentState, UserId};

/// Tier selection service implementing the driving port.
#[derive(Clone)]
pub struct TierSelectionService<R> {
    assignments: Arc<R>,
}

impl<R> TierSelectionService<R> {
    /// Create a new service over the given repository.
    pub fn new(assignments: Arc<R>) -> Self {
        Self { assignments }
    }
}

impl<R> TierSelectionService<R>
where
    R: TierAssignmentRepository,
{
    fn map_repository_error(error: TierAssignmentRepositoryError) -> Error {
        match error {
            TierAssignmentRepositoryError::Connection { message } => Error::service_unavailable(
                format!("tier assignment repository unavailable: {message}"),
            ),
            TierAssignmentRepositoryError::Query { message } => {
                Error::internal(format!("tier assignment repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> TierSelection for TierSelectionService<R>
where
    R: TierAssignmentRepository,
{
    async fn load(&self, user_id: &UserId) -> Result<TierAssignmentState, Error> {
        let assignment = self
            .assignments
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(TierAssignmentState::from_loaded(assignment.as_ref()))
    }

    async fn select(&self, user_id: &UserId, tier: Tier) -> Result<TierAssignment, Error> {
        let stored = self
            .assignments
            .insert_if_absent(user_id, tier)
            .await
            .map_err(Self::map_repository_error)?;
        if stored.tier != tier {
            tracing::debug!(
                user_id = %user_id,
                requested = %tier,
                stored = %stored.tier,
                "tier selection lost to an existing assignment"
            );
        }
        Ok(stored)
    }
}
