//! Driving and driven ports for the domain.
//!
//! Ports are traits the domain depends on (driven: repositories, the
//! identity collaborator) or exposes (driving: services implemented over the
//! driven ports). Adapters live under `inbound/` and `outbound/`.

mod event_repository;
mod identity_provider;
mod macros;
mod showcase;
mod tier_assignment_repository;
mod tier_selection;

pub(crate) use macros::define_port_error;

pub use event_repository::{EventRepository, EventRepositoryError, FixtureEventRepository};
pub use identity_provider::{
    AuthenticatedUser, Credentials, FixtureIdentityProvider, IdentityProvider,
    IdentityProviderError,
};
pub use showcase::{FixtureShowcaseCommand, FixtureShowcaseQuery, ShowcaseCommand, ShowcaseQuery};
pub use tier_assignment_repository::{
    FixtureTierAssignmentRepository, TierAssignmentRepository, TierAssignmentRepositoryError,
};
pub use tier_selection::{FixtureTierSelection, TierSelection};

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
#[cfg(test)]
pub use tier_assignment_repository::MockTierAssignmentRepository;
