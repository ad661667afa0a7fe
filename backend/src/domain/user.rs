//! User identity value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The user id was empty.
    EmptyId,
    /// The user id was not a valid UUID.
    InvalidId,
    /// The email was empty once trimmed.
    EmptyEmail,
    /// The email lacked the minimal `local@domain` shape.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// Equality and hashing use the parsed UUID; the raw string is kept only so
/// `Display` and serialisation preserve the caller's spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for UserId {}

impl std::hash::Hash for UserId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Construct a [`UserId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Primary email address supplied by the identity collaborator.
///
/// Validation here is deliberately shallow: the identity collaborator owns
/// address verification, and this type only needs a stable value for the
/// administrator comparison. That comparison is case-insensitive, so two
/// addresses differing only in case are equal.
///
/// # Examples
///
/// ```
/// # use backend::domain::Email;
/// let a = Email::new("Admin@Example.com").expect("valid email");
/// let b = Email::new("admin@example.com").expect("valid email");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Email {}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_id_accepts_valid_uuid_strings() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case::empty("")]
    #[case::not_a_uuid("not-a-uuid")]
    #[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    fn user_id_rejects_invalid_input(#[case] input: &str) {
        assert!(UserId::new(input).is_err());
    }

    #[rstest]
    fn user_id_round_trips_through_uuid() {
        let id = UserId::random();
        let again = UserId::from_uuid(*id.as_uuid());
        assert_eq!(id, again);
    }

    #[rstest]
    fn user_id_equality_ignores_the_spelling_of_the_raw_string() {
        let upper = UserId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid id");
        let canonical = UserId::from_uuid(*upper.as_uuid());
        assert_eq!(upper, canonical);

        let mut seen = std::collections::HashSet::new();
        seen.insert(upper.clone());
        assert!(seen.contains(&canonical));
        // Display still preserves the original spelling.
        assert_eq!(upper.to_string(), "3FA85F64-5717-4562-B3FC-2C963F66AFA6");
    }

    #[rstest]
    #[case::plain("member@example.com")]
    #[case::subdomain("a@b.example.org")]
    fn email_accepts_minimal_shapes(#[case] input: &str) {
        assert!(Email::new(input).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::no_at("member.example.com")]
    #[case::no_local("@example.com")]
    #[case::no_domain("member@")]
    fn email_rejects_malformed_input(#[case] input: &str) {
        assert!(Email::new(input).is_err());
    }

    #[rstest]
    fn email_equality_ignores_case() {
        let upper = Email::new("ADMIN@EXAMPLE.COM").expect("valid");
        let lower = Email::new("admin@example.com").expect("valid");
        assert_eq!(upper, lower);
        // Display preserves the original spelling.
        assert_eq!(upper.to_string(), "ADMIN@EXAMPLE.COM");
    }
}
