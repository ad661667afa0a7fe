//! Viewer capability model.
//!
//! A viewer is either the administrator, an unrestricted capability, or a
//! member holding one tier. Administrator determination is by configured
//! email match; that rule lives behind [`AdminEmail`] so an explicit role
//! claim can replace the string comparison without touching callers.

use super::{Email, Tier};

/// The configured administrator email address.
///
/// Matching is case-insensitive via [`Email`]'s equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminEmail(Email);

impl AdminEmail {
    /// Wrap the configured administrator address.
    pub const fn new(email: Email) -> Self {
        Self(email)
    }

    /// Whether the given email identifies the administrator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backend::domain::{AdminEmail, Email};
    /// let admin = AdminEmail::new(Email::new("admin@example.com").expect("valid"));
    /// let email = Email::new("ADMIN@example.COM").expect("valid");
    /// assert!(admin.matches(&email));
    /// ```
    pub fn matches(&self, email: &Email) -> bool {
        self.0 == *email
    }
}

/// The current authenticated actor, as seen by the visibility policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Distinguished capability: sees and edits everything.
    Administrator,
    /// Regular member holding one assigned tier.
    Member {
        /// The viewer's assigned tier.
        tier: Tier,
    },
}

impl Viewer {
    /// Derive the viewer for a signed-in email and an assigned tier.
    ///
    /// The administrator capability wins regardless of any stored tier
    /// assignment the same account may hold.
    pub fn for_email(admin: &AdminEmail, email: &Email, tier: Tier) -> Self {
        if admin.matches(email) {
            Self::Administrator
        } else {
            Self::Member { tier }
        }
    }

    /// Whether this viewer holds the administrator capability.
    pub const fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Whether an event requiring `required` is visible to this viewer.
    ///
    /// Access is monotonic: a higher tier sees everything a lower tier sees.
    pub const fn can_see(self, required: Tier) -> bool {
        match self {
            Self::Administrator => true,
            Self::Member { tier } => required.rank() <= tier.rank(),
        }
    }
}
