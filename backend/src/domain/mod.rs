//! Domain primitives, policy, and ports.
//!
//! Purpose: define the tier catalog, the visibility policy, the one-time
//! tier selection flow, and the strongly typed entities they operate on.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Tier`], [`TierFilter`] — the ordered access-level catalog.
//! - [`Viewer`], [`AdminEmail`] — the capability model.
//! - [`visible_events`] — the visibility policy itself.
//! - [`TierAssignment`], [`TierAssignmentState`] — the selection flow.
//! - [`Event`], [`EventDraft`] — the showcase aggregate.
//! - [`Error`], [`ErrorCode`] — transport-agnostic failure payload.

pub mod error;
pub mod event;
pub mod ports;
pub mod showcase_service;
pub mod tier;
pub mod tier_assignment;
pub mod tier_selection_service;
pub mod user;
pub mod viewer;
pub mod visibility;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::event::{Event, EventDraft, EventId, EventValidationError, TITLE_MAX};
pub use self::showcase_service::ShowcaseService;
pub use self::tier::{Tier, TierFilter, UnknownTierError};
pub use self::tier_assignment::{TierAssignment, TierAssignmentState};
pub use self::tier_selection_service::TierSelectionService;
pub use self::user::{Email, UserId, UserValidationError};
pub use self::viewer::{AdminEmail, Viewer};
pub use self::visibility::{apply_filter, visible_events};
