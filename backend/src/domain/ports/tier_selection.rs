//! Driving port for the one-time tier selection flow.

use async_trait::async_trait;

use crate::domain::{Error, Tier, TierAssignment, TierAssignmentState, UserId};

/// Driving port: load and advance a user's tier assignment.
#[async_trait]
pub trait TierSelection: Send + Sync {
    /// Load the user's assignment state from storage.
    ///
    /// Never returns [`TierAssignmentState::Unknown`]; a successful load
    /// resolves to exactly one of `Unassigned` or `Assigned`.
    async fn load(&self, user_id: &UserId) -> Result<TierAssignmentState, Error>;

    /// Select a tier for a user, persisting it once.
    ///
    /// Returns the assignment stored after the call. When the user already
    /// holds an assignment the stored one wins and is returned unchanged.
    async fn select(&self, user_id: &UserId, tier: Tier) -> Result<TierAssignment, Error>;
}

/// Fixture implementation reporting every user as unassigned.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTierSelection;

#[async_trait]
impl TierSelection for FixtureTierSelection {
    async fn load(&self, _user_id: &UserId) -> Result<TierAssignmentState, Error> {
        Ok(TierAssignmentState::Unassigned)
    }

    async fn select(&self, user_id: &UserId, tier: Tier) -> Result<TierAssignment, Error> {
        Ok(TierAssignment {
            user_id: user_id.clone(),
            tier,
        })
    }
}
