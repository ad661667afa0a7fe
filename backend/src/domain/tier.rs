//! The tier catalog: the fixed, ordered set of access levels.
//!
//! Every event carries a minimum [`Tier`] and every non-administrator viewer
//! holds exactly one. The catalog order is total and fixed; rank comparisons
//! drive the visibility policy in [`crate::domain::visibility`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An access tier, ordered from least to most access.
///
/// The declaration order is the catalog order: `Free` ranks 0 and `Platinum`
/// ranks 3. `Ord` follows the same ordering.
///
/// # Examples
///
/// ```
/// # use backend::domain::Tier;
/// assert!(Tier::Silver < Tier::Gold);
/// assert_eq!(Tier::Free.rank(), 0);
/// assert_eq!(Tier::Platinum.rank(), 3);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The entry tier, granted least access.
    Free,
    /// Sees free and silver events.
    Silver,
    /// Sees free, silver, and gold events.
    Gold,
    /// The top tier, granted access to every event.
    Platinum,
}

impl Tier {
    /// The full catalog in ascending-rank order.
    ///
    /// Used to populate tier-selection and tier-editing UI.
    pub const fn all() -> [Self; 4] {
        [Self::Free, Self::Silver, Self::Gold, Self::Platinum]
    }

    /// Zero-based position of this tier in the catalog order.
    pub const fn rank(self) -> usize {
        match self {
            Self::Free => 0,
            Self::Silver => 1,
            Self::Gold => 2,
            Self::Platinum => 3,
        }
    }

    /// Returns the database string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backend::domain::Tier;
    /// assert_eq!(Tier::Gold.as_str(), "gold");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    /// Leniently map a stored tier string onto the catalog.
    ///
    /// Input is lowercased first, so `"Free"` and `"GOLD"` resolve to their
    /// catalog values. Anything unrecognised, including the empty string,
    /// resolves to [`Tier::Free`]: rank 0 grants least access when the value
    /// names a viewer, and a rank-0 event was never privileged, so malformed
    /// data fails closed either way.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backend::domain::Tier;
    /// assert_eq!(Tier::normalise("Gold"), Tier::Gold);
    /// assert_eq!(Tier::normalise("plattinum"), Tier::Free);
    /// assert_eq!(Tier::normalise(""), Tier::Free);
    /// ```
    pub fn normalise(value: &str) -> Self {
        value.to_lowercase().parse().unwrap_or(Self::Free)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when strictly parsing an unknown tier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTierError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for UnknownTierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown tier: {}", self.input)
    }
}

impl std::error::Error for UnknownTierError {}

impl std::str::FromStr for Tier {
    type Err = UnknownTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            _ => Err(UnknownTierError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Display-only restriction applied after the visibility policy.
///
/// This never participates in the access decision; it narrows an already
/// visibility-filtered collection to one tier for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierFilter {
    /// Show every visible event.
    #[default]
    All,
    /// Show only visible events requiring exactly this tier.
    Only(Tier),
}

impl TierFilter {
    /// Whether an event with the given required tier passes the filter.
    pub fn matches(self, tier: Tier) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => tier == selected,
        }
    }
}

impl std::str::FromStr for TierFilter {
    type Err = UnknownTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}
