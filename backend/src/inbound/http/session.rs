//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the signed-in identity, reading it
//! back, and clearing it on sign-out.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AuthenticatedUser;
use crate::domain::{Email, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the signed-in identity in the session cookie.
    pub fn persist_identity(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user.user_id.as_ref())
            .and_then(|()| self.0.insert(EMAIL_KEY, user.email.as_ref()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Clear the session, signing the user out.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the signed-in identity from the session, if present.
    ///
    /// Tampered or stale values are treated as "not signed in" rather than
    /// an error, so the client is simply asked to authenticate again.
    pub fn identity(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let raw_id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let raw_email = self
            .0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;

        let (Some(raw_id), Some(raw_email)) = (raw_id, raw_email) else {
            return Ok(None);
        };

        match (UserId::new(&raw_id), Email::new(raw_email)) {
            (Ok(user_id), Ok(email)) => Ok(Some(AuthenticatedUser { user_id, email })),
            (id_result, email_result) => {
                tracing::warn!(
                    user_id_valid = id_result.is_ok(),
                    email_valid = email_result.is_ok(),
                    "invalid identity in session cookie"
                );
                Ok(None)
            }
        }
    }

    /// Require a signed-in identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<AuthenticatedUser, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
