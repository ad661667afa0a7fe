//! Port for the external identity collaborator.
//!
//! Identity is not this system's concern: the collaborator owns credential
//! verification and account lifecycle. This port only integrates against it,
//! exchanging submitted credentials for a stable user id and primary email.

use async_trait::async_trait;

use crate::domain::{Email, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The submitted credentials were rejected.
        InvalidCredentials { message: String } =>
            "invalid credentials: {message}",
        /// The identity collaborator could not be reached.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
    }
}

/// Credentials submitted through the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The account email address.
    pub email: Email,
    /// The account password, verified by the collaborator.
    pub password: String,
}

/// The signed-in identity returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable, opaque user identifier.
    pub user_id: UserId,
    /// Primary email address, used for the administrator check.
    pub email: Email,
}

/// Port supplying the current session's signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a signed-in identity.
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError>;
}

/// Fixture implementation for development and tests.
///
/// Accepts any known email with the password `password` and derives a stable
/// user id from the email, so repeated sign-ins map to the same account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    const PASSWORD: &'static str = "password";

    fn stable_user_id(email: &Email) -> UserId {
        // UUIDv5 in the URL namespace keeps the fixture deterministic.
        let uuid = uuid::Uuid::new_v5(
            &uuid::Uuid::NAMESPACE_URL,
            email.as_ref().to_lowercase().as_bytes(),
        );
        UserId::from_uuid(uuid)
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityProviderError> {
        if credentials.password != Self::PASSWORD {
            return Err(IdentityProviderError::invalid_credentials(
                "email or password rejected",
            ));
        }
        Ok(AuthenticatedUser {
            user_id: Self::stable_user_id(&credentials.email),
            email: credentials.email.clone(),
        })
    }
}
