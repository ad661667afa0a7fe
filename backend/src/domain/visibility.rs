//! The visibility policy: which events a viewer may see.
//!
//! Pure functions, deterministic for the same inputs and free of side
//! effects. The display filter is layered strictly after the access
//! decision and never widens it.

use super::{Event, TierFilter, Viewer};

/// Select the subset of `events` the viewer is permitted to see.
///
/// The administrator sees everything; a member sees events whose required
/// tier ranks at or below their own. Input order is preserved.
///
/// # Examples
///
/// ```
/// # use backend::domain::{visible_events, Viewer, Tier, EventDraft};
/// let events: Vec<_> = Tier::all()
///     .into_iter()
///     .map(|tier| {
///         EventDraft::new(format!("{tier} night"), "", tier)
///             .into_event()
///             .expect("valid draft")
///     })
///     .collect();
///
/// let visible = visible_events(Viewer::Member { tier: Tier::Silver }, &events);
/// assert_eq!(visible.len(), 2);
/// ```
pub fn visible_events(viewer: Viewer, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| viewer.can_see(event.tier))
        .cloned()
        .collect()
}

/// Narrow an already visibility-filtered collection to one tier for display.
///
/// A plain equality filter; it carries no access semantics.
pub fn apply_filter(filter: TierFilter, events: Vec<Event>) -> Vec<Event> {
    match filter {
        TierFilter::All => events,
        TierFilter::Only(_) => events
            .into_iter()
            .filter(|event| filter.matches(event.tier))
            .collect(),
    }
}
