//! Deck slots - physical positions in the shuffled deck.
//!
//! A `DeckSlot` is one face-down position holding a copy of a catalog card.
//! Two slots may carry the same card name (that is what makes a pair) but
//! never the same `SlotId`. Slot IDs are assigned at build time and not
//! reused across rebuilds, so a host keying UI elements on them never sees
//! a stale element survive a restart.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::catalog::Card;

/// Unique identifier for a deck slot within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// One physical position in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSlot {
    /// Unique within the session; fresh on every rebuild.
    pub slot_id: SlotId,

    /// The card this slot holds. Shared `name` across two slots is a pair.
    pub card: Card,
}

impl DeckSlot {
    /// Create a new slot.
    #[must_use]
    pub fn new(slot_id: SlotId, card: Card) -> Self {
        Self { slot_id, card }
    }

    /// The matching key of the held card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }
}

/// Shuffled sequence of slots, length 2 x pair count.
///
/// `im::Vector` so session snapshots clone in O(1).
pub type Deck = Vector<DeckSlot>;

/// Number of pairs a deck holds.
#[must_use]
pub fn pair_count(deck: &Deck) -> usize {
    deck.len() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;

    #[test]
    fn test_pair_count() {
        let card = Card::new(CardId::new(1), "Lion", "Animals", "img");
        let deck: Deck = (0..6)
            .map(|i| DeckSlot::new(SlotId::new(i), card.clone()))
            .collect();
        assert_eq!(pair_count(&deck), 3);
    }

    #[test]
    fn test_slot_name_reads_card() {
        let slot = DeckSlot::new(
            SlotId::new(0),
            Card::new(CardId::new(1), "Lion", "Animals", "img"),
        );
        assert_eq!(slot.name(), "Lion");
    }
}
