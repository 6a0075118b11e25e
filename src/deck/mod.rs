//! Deck system: slots, construction, and shuffling.
//!
//! ## Key Types
//!
//! - `SlotId` / `DeckSlot` / `Deck`: physical positions in the shuffled deck
//! - `DeckBuilder`: first-N pair pool, duplication, uniform shuffle
//! - `DeckRng`: seeded ChaCha8 randomness behind the shuffle

pub mod builder;
pub mod rng;
pub mod slot;

pub use builder::{DeckBuilder, DeckError, DEFAULT_PAIR_LIMIT};
pub use rng::DeckRng;
pub use slot::{pair_count, Deck, DeckSlot, SlotId};
