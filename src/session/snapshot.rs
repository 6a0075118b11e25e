//! Read-only session snapshot for the host UI.
//!
//! The host renders from this projection instead of reaching into session
//! internals. Visibility is already resolved per slot; the image reference
//! is passed through untouched.

use serde::{Deserialize, Serialize};

use super::state::SessionState;
use crate::catalog::CardId;
use crate::deck::SlotId;

/// One deck slot as the host should render it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// Stable per-round key for UI elements.
    pub slot_id: SlotId,
    /// Catalog identity of the held card.
    pub card_id: CardId,
    /// Display label and matching key.
    pub name: String,
    /// Opaque image locator, untouched by game logic.
    pub image_ref: String,
    /// Face-up iff flipped this pair or already matched.
    pub face_up: bool,
}

/// Read-only view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current state.
    pub state: SessionState,
    /// Deck in play order; empty outside a round.
    pub slots: Vec<SlotView>,
    /// Completed flip pairs this round.
    pub moves: u32,
    /// Pairs resolved so far.
    pub matched_pairs: usize,
    /// Available themes, first-seen order.
    pub themes: Vec<String>,
    /// Retained error message, if any.
    pub error: Option<String>,
}

impl SessionSnapshot {
    /// Whether every pair has been resolved.
    #[must_use]
    pub fn is_won(&self) -> bool {
        matches!(self.state, SessionState::Won)
    }
}
