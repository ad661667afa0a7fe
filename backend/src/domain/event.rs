//! Showcase event aggregate.
//!
//! An [`Event`] is a record gated by a minimum [`Tier`]. Events are owned by
//! the storage collaborator; the domain holds transient, read-mostly copies
//! for the visibility policy and for administrator edits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::Tier;

/// Maximum allowed length for an event title.
pub const TITLE_MAX: usize = 200;

/// Validation errors returned by [`EventDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// The title was empty once trimmed.
    EmptyTitle,
    /// The title exceeded [`TITLE_MAX`] characters.
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The image reference was not a well-formed URL.
    InvalidImageUrl,
}

impl std::fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "event title must be at most {max} characters")
            }
            Self::InvalidImageUrl => write!(f, "image reference must be a well-formed URL"),
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Unique, opaque event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A showcase record gated by a minimum required tier.
///
/// ## Invariants
/// - `title` is non-empty and at most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Short headline shown on the dashboard.
    pub title: String,
    /// Longer description shown on the event card.
    pub description: String,
    /// Minimum tier required to view this event.
    pub tier: Tier,
    /// Calendar date the event takes place, when known.
    pub event_date: Option<NaiveDate>,
    /// Image reference for the event card, when present.
    pub image_url: Option<Url>,
    /// Last update timestamp, owned by the storage collaborator.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or replacing an event.
///
/// # Examples
///
/// ```
/// # use backend::domain::{EventDraft, Tier};
/// let draft = EventDraft::new("Launch night", "Doors at 7", Tier::Silver)
///     .validate()
///     .expect("valid draft");
/// assert_eq!(draft.tier(), Tier::Silver);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    title: String,
    description: String,
    tier: Tier,
    event_date: Option<NaiveDate>,
    image_url: Option<String>,
    validated: bool,
}

impl EventDraft {
    /// Start a draft from the required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>, tier: Tier) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tier,
            event_date: None,
            image_url: None,
            validated: false,
        }
    }

    /// Set the optional event date.
    pub fn event_date(mut self, date: Option<NaiveDate>) -> Self {
        self.event_date = date;
        self
    }

    /// Set the optional image reference (validated as a URL in [`Self::validate`]).
    pub fn image_url(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }

    /// Check the draft invariants, returning the draft on success.
    pub fn validate(mut self) -> Result<Self, EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.title.chars().count() > TITLE_MAX {
            return Err(EventValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if let Some(raw) = &self.image_url {
            Url::parse(raw).map_err(|_| EventValidationError::InvalidImageUrl)?;
        }
        self.validated = true;
        Ok(self)
    }

    /// Materialise the draft into an [`Event`] with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns the validation error when the draft has not passed
    /// [`Self::validate`].
    pub fn into_event(self) -> Result<Event, EventValidationError> {
        self.into_event_with_id(EventId::random())
    }

    /// Materialise the draft into an [`Event`] with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns the validation error when the draft has not passed
    /// [`Self::validate`].
    pub fn into_event_with_id(self, id: EventId) -> Result<Event, EventValidationError> {
        let draft = if self.validated {
            self
        } else {
            self.validate()?
        };
        let image_url = match draft.image_url {
            Some(raw) => {
                Some(Url::parse(&raw).map_err(|_| EventValidationError::InvalidImageUrl)?)
            }
            None => None,
        };
        Ok(Event {
            id,
            title: draft.title,
            description: draft.description,
            tier: draft.tier,
            event_date: draft.event_date,
            image_url,
            updated_at: Utc::now(),
        })
    }

    /// The draft's required tier.
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// The draft's title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}
