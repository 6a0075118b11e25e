//! # memoria
//!
//! A theme-scoped memory-matching game session engine.
//!
//! The engine turns a flat pool of labeled image cards into a playable
//! matching game: theme discovery, deck construction, pairwise flip
//! selection, match resolution, move counting, and win detection. Card
//! storage, editing UIs, and rendering are the host's concern; the engine
//! depends on the catalog only through the narrow `CardCatalogClient` read
//! contract.
//!
//! ## Design Principles
//!
//! 1. **Sans-IO session**: `GameSession` never fetches or sleeps. It hands
//!    the host `CardRequest`s to fulfil and `TimerToken`s to schedule, and
//!    drops responses whose generation has been superseded - a stale deck
//!    load or timer can never mutate a newer session.
//!
//! 2. **One exhaustive state**: `SessionState` replaces independent
//!    loading/error/playing flags, so impossible combinations cannot be
//!    represented.
//!
//! 3. **Uniform shuffles**: deck permutations come from a seeded ChaCha8
//!    Fisher-Yates shuffle. Determinism under a fixed seed keeps
//!    shuffle-dependent scenarios reproducible.
//!
//! ## Modules
//!
//! - `catalog`: card records, the catalog read contract, theme discovery
//! - `deck`: slots, deck construction, shuffling
//! - `session`: the state machine, match resolution, snapshots, driver
//!
//! ## Quick Start
//!
//! ```
//! use memoria::catalog::{InMemoryCatalog, ThemeChoice};
//! use memoria::deck::DeckRng;
//! use memoria::session::{FlipOutcome, SessionDriver, SessionState};
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.insert("Lion", "Animals", "images/lion.png");
//! catalog.insert("Cat", "Animals", "images/cat.png");
//!
//! let mut driver = SessionDriver::new(catalog, DeckRng::seeded(42));
//! driver.start();
//! driver.select_theme(ThemeChoice::Named("Animals".into()));
//! assert_eq!(*driver.session().state(), SessionState::Playing);
//!
//! // Flip the two "Lion" slots.
//! let lions: Vec<usize> = driver
//!     .session()
//!     .deck()
//!     .iter()
//!     .enumerate()
//!     .filter(|(_, s)| s.name() == "Lion")
//!     .map(|(i, _)| i)
//!     .collect();
//! driver.flip(lions[0]);
//! let outcome = driver.flip(lions[1]);
//! assert!(matches!(outcome, FlipOutcome::Matched { .. }));
//! assert_eq!(driver.session().moves(), 1);
//! ```

pub mod catalog;
pub mod deck;
pub mod session;

// Re-export commonly used types
pub use crate::catalog::{
    Card, CardCatalogClient, CardFilter, CardId, CatalogError, InMemoryCatalog, ThemeCatalog,
    ThemeChoice,
};

pub use crate::deck::{
    pair_count, Deck, DeckBuilder, DeckError, DeckRng, DeckSlot, SlotId, DEFAULT_PAIR_LIMIT,
};

pub use crate::session::{
    CardRequest, FailureReason, FlipOutcome, GameSession, Generation, MatchOutcome, MatchResolver,
    RequestKind, SessionDriver, SessionSnapshot, SessionState, SlotView, TimerToken,
};
