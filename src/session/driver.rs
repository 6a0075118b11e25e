//! Client-backed session runner.
//!
//! `SessionDriver` is the glue a host would otherwise write itself: it
//! owns a session plus a catalog client, fulfils `CardRequest`s against
//! the client as they are issued, and holds the armed mismatch timer so
//! `tick()` can fire it - one tick is the reveal delay. Embedders with
//! their own event loop or scheduler drive `GameSession` directly instead.

use super::game::{FlipOutcome, GameSession};
use super::snapshot::SessionSnapshot;
use super::state::{CardRequest, TimerToken};
use crate::catalog::{CardCatalogClient, ThemeChoice};
use crate::deck::DeckRng;

/// Owns a session and a catalog client, fulfilling requests synchronously.
///
/// ## Example
///
/// ```
/// use memoria::catalog::{InMemoryCatalog, ThemeChoice};
/// use memoria::deck::DeckRng;
/// use memoria::session::{SessionDriver, SessionState};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert("Lion", "Animals", "img/lion");
/// catalog.insert("Cat", "Animals", "img/cat");
///
/// let mut driver = SessionDriver::new(catalog, DeckRng::seeded(42));
/// driver.start();
/// driver.select_theme(ThemeChoice::All);
/// assert_eq!(*driver.session().state(), SessionState::Playing);
/// ```
#[derive(Debug)]
pub struct SessionDriver<C> {
    client: C,
    session: GameSession,
    armed_timer: Option<TimerToken>,
}

impl<C: CardCatalogClient> SessionDriver<C> {
    /// Create a driver around a fresh session.
    #[must_use]
    pub fn new(client: C, rng: DeckRng) -> Self {
        Self {
            client,
            session: GameSession::new(rng),
            armed_timer: None,
        }
    }

    /// Start the session and load themes.
    pub fn start(&mut self) {
        if let Some(request) = self.session.start() {
            self.fulfil(request);
        }
    }

    /// Select a theme and load its deck.
    pub fn select_theme(&mut self, choice: ThemeChoice) {
        if let Some(request) = self.session.select_theme(choice) {
            self.fulfil(request);
        }
    }

    /// Flip a slot, arming the reveal timer on a mismatch.
    pub fn flip(&mut self, slot_index: usize) -> FlipOutcome {
        let outcome = self.session.flip(slot_index);
        if let FlipOutcome::Mismatch { timer } = &outcome {
            self.armed_timer = Some(*timer);
        }
        outcome
    }

    /// Advance time by one unit, firing the armed reveal timer if any.
    pub fn tick(&mut self) {
        if let Some(timer) = self.armed_timer.take() {
            self.session.timer_fired(timer);
        }
    }

    /// Return to theme selection.
    pub fn reset(&mut self) {
        self.armed_timer = None;
        self.session.reset();
    }

    /// Reload a fresh deck for the same theme.
    pub fn restart(&mut self) {
        self.armed_timer = None;
        if let Some(request) = self.session.restart() {
            self.fulfil(request);
        }
    }

    /// Retry after a failure.
    pub fn retry(&mut self) {
        self.armed_timer = None;
        if let Some(request) = self.session.retry() {
            self.fulfil(request);
        }
    }

    /// Read-only snapshot of the underlying session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The catalog client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Mutable catalog access, for hosts that edit cards between rounds.
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    fn fulfil(&mut self, request: CardRequest) {
        use super::state::RequestKind;

        let result = self.client.fetch_cards(&request.filter);
        match request.kind {
            RequestKind::Themes => self.session.resolve_themes(request.generation, result),
            RequestKind::Deck => self.session.resolve_deck(request.generation, result),
        }
    }
}
