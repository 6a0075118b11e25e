//! In-memory card catalog.
//!
//! `InMemoryCatalog` is the reference `CardCatalogClient`: a Vec-backed
//! store that preserves insertion order. Insertion order IS catalog order,
//! which the deck builder's first-N-pairs policy and the theme list's
//! first-seen ordering both depend on, so a map-backed store would not do.

use super::card::{Card, CardFilter, CardId};
use super::client::{CardCatalogClient, CatalogError};

/// Vec-backed catalog preserving insertion order.
///
/// ## Example
///
/// ```
/// use memoria::catalog::{CardCatalogClient, CardFilter, InMemoryCatalog};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert("Lion", "Animals", "images/lion.png");
/// catalog.insert("Mars", "Planets", "images/mars.png");
///
/// let animals = catalog.fetch_cards(&CardFilter::theme("Animals")).unwrap();
/// assert_eq!(animals.len(), 1);
/// assert_eq!(animals[0].name, "Lion");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    cards: Vec<Card>,
    next_id: u64,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        theme: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        self.cards.push(Card::new(id, name, theme, image_ref));
        id
    }

    /// Remove a card by ID.
    ///
    /// Returns the removed card, or `None` if no card has that ID.
    /// Remaining cards keep their relative order.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(pos))
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Number of cards in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl CardCatalogClient for InMemoryCatalog {
    fn fetch_cards(&self, filter: &CardFilter) -> Result<Vec<Card>, CatalogError> {
        Ok(self
            .cards
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }
}
