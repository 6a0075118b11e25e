//! Deck construction.
//!
//! Turns a pool of catalog cards into a shuffled, duplicated deck of
//! flip-able slots:
//!
//! 1. Take the first `min(pair_limit, pool)` cards in catalog order.
//! 2. Duplicate that pool once and assign fresh sequential slot IDs.
//! 3. Shuffle the 2N slots with a uniform permutation.
//!
//! The pair pool is the first N by catalog order, not a random sample.
//! That is the documented selection policy, kept as-is.

use thiserror::Error;

use super::rng::DeckRng;
use super::slot::{Deck, DeckSlot, SlotId};
use crate::catalog::Card;

/// Default cap on pairs per round.
pub const DEFAULT_PAIR_LIMIT: usize = 8;

/// Deck construction failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    /// Fewer than two cards available - not even one pair.
    #[error("not enough cards to play: need at least 2, found {available}")]
    InsufficientCards {
        /// How many cards the pool actually held.
        available: usize,
    },
}

/// Builds shuffled decks from card pools.
///
/// Slot IDs continue across builds from the same builder, so no ID is ever
/// reused between a deck and its replacement after a restart.
///
/// ## Example
///
/// ```
/// use memoria::catalog::{Card, CardId};
/// use memoria::deck::{DeckBuilder, DeckRng};
///
/// let pool = vec![
///     Card::new(CardId::new(1), "Lion", "Animals", "img/lion"),
///     Card::new(CardId::new(2), "Cat", "Animals", "img/cat"),
/// ];
///
/// let mut builder = DeckBuilder::new(DeckRng::seeded(42));
/// let deck = builder.build(&pool).unwrap();
/// assert_eq!(deck.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    rng: DeckRng,
    pair_limit: usize,
    next_slot_id: u32,
}

impl DeckBuilder {
    /// Create a builder with the default pair limit.
    #[must_use]
    pub fn new(rng: DeckRng) -> Self {
        Self {
            rng,
            pair_limit: DEFAULT_PAIR_LIMIT,
            next_slot_id: 0,
        }
    }

    /// Override the pair cap.
    ///
    /// Selection stays first-N-by-catalog-order regardless of the cap.
    #[must_use]
    pub fn pair_limit(mut self, limit: usize) -> Self {
        assert!(limit >= 1, "pair limit must be at least 1");
        self.pair_limit = limit;
        self
    }

    /// Build a shuffled deck from the card pool.
    ///
    /// Fails with `DeckError::InsufficientCards` when the pool holds fewer
    /// than two cards. The pool is never mutated.
    pub fn build(&mut self, cards: &[Card]) -> Result<Deck, DeckError> {
        if cards.len() < 2 {
            return Err(DeckError::InsufficientCards {
                available: cards.len(),
            });
        }

        let pool_size = self.pair_limit.min(cards.len());
        let pool = &cards[..pool_size];

        let mut slots: Vec<DeckSlot> = Vec::with_capacity(pool_size * 2);
        for card in pool.iter().chain(pool.iter()) {
            let slot_id = SlotId::new(self.next_slot_id);
            self.next_slot_id += 1;
            slots.push(DeckSlot::new(slot_id, card.clone()));
        }

        self.rng.shuffle(&mut slots);

        log::debug!(
            "built deck: {} pairs from pool of {}, seed {}",
            pool_size,
            cards.len(),
            self.rng.seed()
        );

        Ok(slots.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;
    use rustc_hash::FxHashMap;

    fn pool(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                Card::new(
                    CardId::new(i as u64),
                    format!("Card {i}"),
                    "Theme",
                    format!("img/{i}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_every_name_appears_exactly_twice() {
        let mut builder = DeckBuilder::new(DeckRng::seeded(1));
        let deck = builder.build(&pool(5)).unwrap();

        assert_eq!(deck.len(), 10);

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for slot in deck.iter() {
            *counts.entry(slot.name()).or_default() += 1;
        }
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_pair_limit_caps_large_pools() {
        let mut builder = DeckBuilder::new(DeckRng::seeded(1));
        let deck = builder.build(&pool(20)).unwrap();
        assert_eq!(deck.len(), DEFAULT_PAIR_LIMIT * 2);
    }

    #[test]
    fn test_pool_selection_is_first_n_by_catalog_order() {
        let mut builder = DeckBuilder::new(DeckRng::seeded(1)).pair_limit(3);
        let deck = builder.build(&pool(10)).unwrap();

        let mut names: Vec<&str> = deck.iter().map(DeckSlot::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names, vec!["Card 0", "Card 1", "Card 2"]);
    }

    #[test]
    fn test_single_card_is_insufficient() {
        let mut builder = DeckBuilder::new(DeckRng::seeded(1));
        assert_eq!(
            builder.build(&pool(1)),
            Err(DeckError::InsufficientCards { available: 1 })
        );
        assert_eq!(
            builder.build(&[]),
            Err(DeckError::InsufficientCards { available: 0 })
        );
    }

    #[test]
    fn test_slot_ids_are_fresh_across_rebuilds() {
        let mut builder = DeckBuilder::new(DeckRng::seeded(1));
        let first = builder.build(&pool(2)).unwrap();
        let second = builder.build(&pool(2)).unwrap();

        let first_ids: Vec<SlotId> = first.iter().map(|s| s.slot_id).collect();
        for slot in second.iter() {
            assert!(!first_ids.contains(&slot.slot_id));
        }
    }

    #[test]
    fn test_input_pool_is_not_mutated() {
        let cards = pool(4);
        let before = cards.clone();
        let mut builder = DeckBuilder::new(DeckRng::seeded(1));
        builder.build(&cards).unwrap();
        assert_eq!(cards, before);
    }
}
