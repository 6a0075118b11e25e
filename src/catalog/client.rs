//! Catalog read contract.
//!
//! The game session depends on the card catalog only through
//! `CardCatalogClient`: fetch cards, optionally scoped to a theme. Storage,
//! CRUD, and transport are the catalog's concern; the session treats the
//! client as a black box and performs no automatic retries.

use thiserror::Error;

use super::card::{Card, CardFilter};

/// Failure fetching cards from the catalog.
///
/// `Unavailable` covers transport-level failures (network down, backend not
/// running). An unknown theme is NOT an error - it yields `Ok(vec![])`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the card catalog.
///
/// ## Contract
///
/// - `fetch_cards` with an empty filter returns every card, in catalog order.
/// - A theme filter matches `Card::theme` exactly (case-sensitive).
/// - A theme with no cards yields `Ok` with an empty vector.
/// - Catalog order is stable across calls; the deck builder's
///   first-N-pairs policy depends on it.
pub trait CardCatalogClient {
    /// Fetch cards matching the filter.
    fn fetch_cards(&self, filter: &CardFilter) -> Result<Vec<Card>, CatalogError>;
}
