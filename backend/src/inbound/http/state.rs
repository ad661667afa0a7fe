//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AdminEmail;
use crate::domain::ports::{IdentityProvider, ShowcaseCommand, ShowcaseQuery, TierSelection};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// External identity collaborator.
    pub identity: Arc<dyn IdentityProvider>,
    /// Visibility-filtered showcase reads.
    pub showcase: Arc<dyn ShowcaseQuery>,
    /// Administrator mutations on the showcase.
    pub showcase_command: Arc<dyn ShowcaseCommand>,
    /// One-time tier selection flow.
    pub tier_selection: Arc<dyn TierSelection>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// External identity collaborator.
    pub identity: Arc<dyn IdentityProvider>,
    /// Visibility-filtered showcase reads.
    pub showcase: Arc<dyn ShowcaseQuery>,
    /// Administrator mutations on the showcase.
    pub showcase_command: Arc<dyn ShowcaseCommand>,
    /// One-time tier selection flow.
    pub tier_selection: Arc<dyn TierSelection>,
    /// The configured administrator address.
    pub admin_email: AdminEmail,
}

impl HttpState {
    /// Construct state from a ports bundle and the administrator address.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AdminEmail, Email};
    /// use backend::domain::ports::{
    ///     FixtureIdentityProvider, FixtureShowcaseCommand, FixtureShowcaseQuery,
    ///     FixtureTierSelection,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     identity: Arc::new(FixtureIdentityProvider),
    ///     showcase: Arc::new(FixtureShowcaseQuery),
    ///     showcase_command: Arc::new(FixtureShowcaseCommand),
    ///     tier_selection: Arc::new(FixtureTierSelection),
    /// };
    /// let admin = AdminEmail::new(Email::new("admin@example.com").expect("valid email"));
    /// let state = HttpState::new(ports, admin);
    /// let _showcase = state.showcase.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, admin_email: AdminEmail) -> Self {
        let HttpStatePorts {
            identity,
            showcase,
            showcase_command,
            tier_selection,
        } = ports;
        Self {
            identity,
            showcase,
            showcase_command,
            tier_selection,
            admin_email,
        }
    }
}
