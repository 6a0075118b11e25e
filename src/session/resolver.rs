//! Match resolution - pure decision logic.
//!
//! Given two revealed slots, decide match or no-match. No side effects;
//! the session applies the outcome to its own state.

use crate::deck::Deck;

/// Result of comparing two revealed slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the two slots carry the same card name.
    pub is_match: bool,
    /// The shared name, present only on a match.
    pub matched_name: Option<String>,
}

/// Pure match decision over deck indices.
pub struct MatchResolver;

impl MatchResolver {
    /// Decide whether the slots at `first` and `second` match.
    ///
    /// Commutative in its two indices. `first != second` is a precondition;
    /// the session's flip guard never passes the same slot twice.
    #[must_use]
    pub fn resolve(deck: &Deck, first: usize, second: usize) -> MatchOutcome {
        debug_assert!(first != second, "cannot resolve a slot against itself");
        debug_assert!(first < deck.len() && second < deck.len());

        let a = &deck[first];
        let b = &deck[second];

        if a.name() == b.name() {
            MatchOutcome {
                is_match: true,
                matched_name: Some(a.card.name.clone()),
            }
        } else {
            MatchOutcome {
                is_match: false,
                matched_name: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Card, CardId};
    use crate::deck::{DeckSlot, SlotId};

    fn deck_of(names: &[&str]) -> Deck {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                DeckSlot::new(
                    SlotId::new(i as u32),
                    Card::new(CardId::new(i as u64), *name, "Theme", "img"),
                )
            })
            .collect()
    }

    #[test]
    fn test_equal_names_match() {
        let deck = deck_of(&["Lion", "Cat", "Lion", "Cat"]);
        let outcome = MatchResolver::resolve(&deck, 0, 2);
        assert!(outcome.is_match);
        assert_eq!(outcome.matched_name.as_deref(), Some("Lion"));
    }

    #[test]
    fn test_different_names_do_not_match() {
        let deck = deck_of(&["Lion", "Cat", "Lion", "Cat"]);
        let outcome = MatchResolver::resolve(&deck, 0, 1);
        assert!(!outcome.is_match);
        assert_eq!(outcome.matched_name, None);
    }

    #[test]
    fn test_resolve_is_commutative() {
        let deck = deck_of(&["Lion", "Cat", "Lion", "Cat"]);
        for (i, j) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            assert_eq!(
                MatchResolver::resolve(&deck, i, j),
                MatchResolver::resolve(&deck, j, i)
            );
        }
    }
}
