//! Tiered event showcase backend.
//!
//! A session-authenticated dashboard where every event carries a minimum
//! tier, members hold exactly one tier chosen once, and an administrator
//! manages the event collection. The crate follows a hexagonal layout:
//!
//! - [`domain`]: the tier catalog, visibility policy, event aggregate, and
//!   the ports the adapters implement
//! - [`inbound`]: the HTTP adapter translating requests into domain calls
//! - [`outbound`]: PostgreSQL persistence and the identity roster adapter
//! - [`doc`]: the OpenAPI surface used by Swagger UI and tooling

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
