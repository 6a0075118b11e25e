//! Theme discovery.
//!
//! Derives the set of distinct themes from a card snapshot. Order is
//! first-seen order in the input - stable, not sorted - so the theme picker
//! shows themes in the order cards were registered.

use rustc_hash::FxHashSet;

use super::card::Card;

/// Derives theme listings from card snapshots.
pub struct ThemeCatalog;

impl ThemeCatalog {
    /// List distinct themes in first-seen order.
    ///
    /// Empty input yields an empty list; the session treats that as a fatal
    /// precondition for starting play. The input is not mutated.
    #[must_use]
    pub fn distinct_themes(cards: &[Card]) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut themes = Vec::new();
        for card in cards {
            if seen.insert(card.theme.as_str()) {
                themes.push(card.theme.clone());
            }
        }
        themes
    }
}
