//! Per-user tier assignment and its one-time selection state machine.
//!
//! A user starts in [`TierAssignmentState::Unknown`] until the stored
//! assignment is loaded. Loading resolves to `Unassigned` (no row) or
//! `Assigned` (one row). From `Unassigned`, selecting a tier issues exactly
//! one create request; `Assigned` is terminal for the session.

use serde::{Deserialize, Serialize};

use super::{Tier, UserId};

/// The access tier granted to one user.
///
/// ## Invariants
/// - At most one assignment exists per user; the first stored row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TierAssignment {
    /// The user holding the assignment.
    pub user_id: UserId,
    /// The granted tier.
    pub tier: Tier,
}

/// Where a user sits in the one-time tier-selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierAssignmentState {
    /// The stored assignment has not been loaded yet.
    Unknown,
    /// Loaded; no assignment exists and the selection flow must run.
    Unassigned,
    /// Loaded; the user holds this tier for the rest of the session.
    Assigned(Tier),
}

impl TierAssignmentState {
    /// Resolve the state from a completed load.
    pub fn from_loaded(assignment: Option<&TierAssignment>) -> Self {
        match assignment {
            Some(found) => Self::Assigned(found.tier),
            None => Self::Unassigned,
        }
    }

    /// The assigned tier, when one exists.
    pub const fn tier(self) -> Option<Tier> {
        match self {
            Self::Assigned(tier) => Some(tier),
            Self::Unknown | Self::Unassigned => None,
        }
    }
}
