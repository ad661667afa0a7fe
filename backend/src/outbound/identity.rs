//! Static roster adapter for the identity collaborator port.
//!
//! Production deployments wire a real external provider behind
//! [`IdentityProvider`]. Until one is connected, this adapter authenticates
//! against a fixed roster parsed from configuration, deriving stable user
//! ids so repeated sign-ins map to the same account.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    AuthenticatedUser, Credentials, IdentityProvider, IdentityProviderError,
};
use crate::domain::{Email, UserId};

/// Identity adapter backed by an in-memory roster.
///
/// Keys are lowercased email addresses; values are the expected passwords.
/// The roster is parsed once at startup with [`StaticIdentityProvider::from_spec`].
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    roster: HashMap<String, String>,
}

/// Error returned when a roster specification cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed roster entry: {entry:?} (expected email:password)")]
pub struct RosterParseError {
    /// The entry that failed to parse.
    pub entry: String,
}

impl StaticIdentityProvider {
    /// Build a provider from an explicit roster.
    pub fn new(entries: impl IntoIterator<Item = (Email, String)>) -> Self {
        let roster = entries
            .into_iter()
            .map(|(email, password)| (email.as_ref().to_lowercase(), password))
            .collect();
        Self { roster }
    }

    /// Parse a comma-separated `email:password` roster specification.
    ///
    /// # Errors
    ///
    /// Fails when an entry lacks a `:` separator or its email half is not a
    /// plausible address.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backend::outbound::identity::StaticIdentityProvider;
    /// let provider =
    ///     StaticIdentityProvider::from_spec("admin@example.com:s3cret,member@example.com:pw")
    ///         .expect("valid roster");
    /// ```
    pub fn from_spec(spec: &str) -> Result<Self, RosterParseError> {
        let mut entries = Vec::new();
        for entry in spec.split(',').filter(|e| !e.trim().is_empty()) {
            let (email, password) = entry
                .trim()
                .split_once(':')
                .ok_or_else(|| RosterParseError {
                    entry: entry.to_owned(),
                })?;
            let email = Email::new(email).map_err(|_| RosterParseError {
                entry: entry.to_owned(),
            })?;
            entries.push((email, password.to_owned()));
        }
        Ok(Self::new(entries))
    }

    fn stable_user_id(email: &Email) -> UserId {
        // UUIDv5 in the URL namespace keeps ids deterministic per address.
        let uuid = uuid::Uuid::new_v5(
            &uuid::Uuid::NAMESPACE_URL,
            email.as_ref().to_lowercase().as_bytes(),
        );
        UserId::from_uuid(uuid)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        let key = credentials.email.as_ref().to_lowercase();
        match self.roster.get(&key) {
            Some(expected) if *expected == credentials.password => Ok(AuthenticatedUser {
                user_id: Self::stable_user_id(&credentials.email),
                email: credentials.email.clone(),
            }),
            Some(_) | None => {
                warn!(email = %key, "sign-in rejected");
                Err(IdentityProviderError::invalid_credentials(
                    "email or password rejected",
                ))
            }
        }
    }
}
