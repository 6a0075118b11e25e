//! Card records - the catalog's view of a playable card.
//!
//! A `Card` is a snapshot read from the catalog. The game session never
//! mutates cards; it duplicates them into deck slots and compares their
//! names. Two cards with equal `name` form a pair - `name` is the matching
//! key, `id` is only catalog identity.

use serde::{Deserialize, Serialize};

/// Unique identifier assigned by the card catalog.
///
/// Stable across fetches; distinct from the per-deck `SlotId` a card
/// occupies during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A labeled image card as stored in the catalog.
///
/// ## Example
///
/// ```
/// use memoria::catalog::{Card, CardId};
///
/// let lion = Card::new(CardId::new(1), "Lion", "Animals", "images/lion.png");
/// assert_eq!(lion.name, "Lion");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Catalog-assigned identifier.
    pub id: CardId,

    /// Display label and matching key.
    pub name: String,

    /// Theme tag grouping cards into playable subsets.
    pub theme: String,

    /// Opaque image locator (URL or embedded data). Passed through
    /// untouched; game logic never inspects it.
    pub image_ref: String,
}

impl Card {
    /// Create a new card record.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        theme: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            theme: theme.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Filter for catalog fetches.
///
/// `theme: None` fetches every card; `Some(theme)` matches exactly
/// (case-sensitive). An unknown theme yields an empty result, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    /// Exact theme to match, or `None` for all cards.
    pub theme: Option<String>,
}

impl CardFilter {
    /// Filter matching every card.
    #[must_use]
    pub const fn all() -> Self {
        Self { theme: None }
    }

    /// Filter matching cards whose theme equals `theme` exactly.
    #[must_use]
    pub fn theme(theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
        }
    }

    /// Check whether a card passes this filter.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        match &self.theme {
            Some(theme) => card.theme == *theme,
            None => true,
        }
    }
}

/// A player's theme selection: a specific theme or the "all cards" sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeChoice {
    /// Play with the full catalog, no theme scoping.
    All,
    /// Play only cards tagged with this theme (exact match).
    Named(String),
}

impl ThemeChoice {
    /// Convert this choice into the catalog filter it implies.
    #[must_use]
    pub fn to_filter(&self) -> CardFilter {
        match self {
            ThemeChoice::All => CardFilter::all(),
            ThemeChoice::Named(theme) => CardFilter::theme(theme.clone()),
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::All => write!(f, "all"),
            ThemeChoice::Named(theme) => write!(f, "{theme}"),
        }
    }
}
