//! The game session state machine.
//!
//! `GameSession` coordinates theme selection, deck load, play, and win
//! detection. It is sans-IO: transitions that need the catalog hand the
//! host a `CardRequest` to fulfil, and a mismatching flip hands the host a
//! `TimerToken` to schedule. Responses re-enter through `resolve_themes`,
//! `resolve_deck`, and `timer_fired`, and are dropped when their generation
//! no longer matches - a stale deck load arriving after `reset()` cannot
//! touch the newer session.
//!
//! ## Flip protocol
//!
//! During `Playing`, `flip(i)` either records a first face-up slot or
//! completes a pair. A completed pair increments the move counter exactly
//! once and resolves immediately: a match clears the flip set
//! synchronously and may end the round; a mismatch leaves both slots
//! face-up until the host fires the returned timer token. Guard-rejected
//! flips (slot already up, two already up, pair already matched) are
//! silent no-ops - they are normal UI races, not faults.

use im::HashSet as ImHashSet;
use smallvec::SmallVec;

use super::resolver::MatchResolver;
use super::snapshot::{SessionSnapshot, SlotView};
use super::state::{
    CardRequest, FailureReason, Generation, RequestKind, SessionState, TimerToken,
};
use crate::catalog::{Card, CardFilter, CatalogError, ThemeCatalog, ThemeChoice};
use crate::deck::{pair_count, Deck, DeckBuilder, DeckError, DeckRng};

/// Observer invoked after every committed state transition.
pub type StateObserver = Box<dyn FnMut(&SessionState)>;

/// Result of a flip request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Guard rejection - nothing changed.
    Rejected,
    /// First slot of a pair recorded.
    Flipped,
    /// Second slot completed a matching pair.
    Matched {
        /// The name resolved as a pair.
        name: String,
        /// Whether this match won the round.
        won: bool,
    },
    /// Second slot completed a non-matching pair; both stay face-up until
    /// the host fires the token.
    Mismatch {
        /// Token to pass to `timer_fired` after the reveal delay.
        timer: TimerToken,
    },
}

/// Memory-matching game session.
///
/// ## Example
///
/// ```
/// use memoria::catalog::{Card, CardId, ThemeChoice};
/// use memoria::deck::DeckRng;
/// use memoria::session::{GameSession, SessionState};
///
/// let mut session = GameSession::new(DeckRng::seeded(42));
/// let request = session.start().unwrap();
///
/// // Host fulfils the request against its catalog.
/// let cards = vec![
///     Card::new(CardId::new(1), "Lion", "Animals", "img/lion"),
///     Card::new(CardId::new(2), "Cat", "Animals", "img/cat"),
/// ];
/// session.resolve_themes(request.generation, Ok(cards.clone()));
/// assert_eq!(*session.state(), SessionState::SelectingTheme);
///
/// let request = session.select_theme(ThemeChoice::All).unwrap();
/// session.resolve_deck(request.generation, Ok(cards));
/// assert_eq!(*session.state(), SessionState::Playing);
/// assert_eq!(session.deck().len(), 4);
/// ```
pub struct GameSession {
    state: SessionState,
    generation: Generation,
    timer_sequence: u64,

    themes: Vec<String>,
    theme: Option<ThemeChoice>,

    deck: Deck,
    flipped: SmallVec<[usize; 2]>,
    matched: ImHashSet<String>,
    moves: u32,
    pending_clear: Option<TimerToken>,

    last_error: Option<String>,
    builder: DeckBuilder,
    observer: Option<StateObserver>,
}

impl GameSession {
    /// Create an idle session using the given RNG for deck shuffles.
    #[must_use]
    pub fn new(rng: DeckRng) -> Self {
        Self::with_builder(DeckBuilder::new(rng))
    }

    /// Create an idle session with a preconfigured deck builder.
    #[must_use]
    pub fn with_builder(builder: DeckBuilder) -> Self {
        Self {
            state: SessionState::Idle,
            generation: Generation::initial(),
            timer_sequence: 0,
            themes: Vec::new(),
            theme: None,
            deck: Deck::new(),
            flipped: SmallVec::new(),
            matched: ImHashSet::new(),
            moves: 0,
            pending_clear: None,
            last_error: None,
            builder,
            observer: None,
        }
    }

    /// Register an observer fired after every committed transition.
    pub fn set_observer(&mut self, observer: impl FnMut(&SessionState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // === Lifecycle ===

    /// Begin the session: `Idle -> LoadingThemes`.
    ///
    /// Returns the full-catalog fetch for the host to fulfil, or `None` if
    /// the session has already started.
    pub fn start(&mut self) -> Option<CardRequest> {
        if self.state != SessionState::Idle {
            log::warn!("start ignored in state '{}'", self.state);
            return None;
        }
        self.transition(SessionState::LoadingThemes);
        Some(self.request(RequestKind::Themes, CardFilter::all()))
    }

    /// Deliver the theme-load response.
    ///
    /// Ignored unless the session is in `LoadingThemes` and `generation`
    /// matches the outstanding request.
    pub fn resolve_themes(
        &mut self,
        generation: Generation,
        result: Result<Vec<Card>, CatalogError>,
    ) {
        if self.state != SessionState::LoadingThemes || generation != self.generation {
            log::debug!("dropping stale theme response (generation {:?})", generation);
            return;
        }
        match result {
            Ok(cards) if cards.is_empty() => {
                self.fail(FailureReason::EmptyCatalog);
            }
            Ok(cards) => {
                self.themes = ThemeCatalog::distinct_themes(&cards);
                self.transition(SessionState::SelectingTheme);
            }
            Err(err) => {
                log::warn!("theme load failed: {err}");
                self.fail(FailureReason::CatalogUnavailable);
            }
        }
    }

    /// Choose a theme (or the "all" sentinel): `SelectingTheme -> LoadingDeck`.
    ///
    /// Returns the theme-scoped fetch for the host to fulfil, or `None`
    /// outside `SelectingTheme`.
    pub fn select_theme(&mut self, choice: ThemeChoice) -> Option<CardRequest> {
        if self.state != SessionState::SelectingTheme {
            log::warn!("select_theme ignored in state '{}'", self.state);
            return None;
        }
        self.bump_generation();
        self.last_error = None;
        let filter = choice.to_filter();
        self.theme = Some(choice);
        self.transition(SessionState::LoadingDeck);
        Some(self.request(RequestKind::Deck, filter))
    }

    /// Deliver the deck-load response.
    ///
    /// Ignored unless the session is in `LoadingDeck` and `generation`
    /// matches. Too few cards for the chosen theme is recoverable: the
    /// session returns to `SelectingTheme` with a retained message and the
    /// previous play state untouched. A transport failure is fatal.
    pub fn resolve_deck(
        &mut self,
        generation: Generation,
        result: Result<Vec<Card>, CatalogError>,
    ) {
        if self.state != SessionState::LoadingDeck || generation != self.generation {
            log::debug!("dropping stale deck response (generation {:?})", generation);
            return;
        }
        match result {
            Ok(cards) => match self.builder.build(&cards) {
                Ok(deck) => {
                    self.deck = deck;
                    self.flipped.clear();
                    self.matched = ImHashSet::new();
                    self.moves = 0;
                    self.pending_clear = None;
                    self.last_error = None;
                    self.transition(SessionState::Playing);
                }
                Err(err @ DeckError::InsufficientCards { .. }) => {
                    let theme = self
                        .theme
                        .as_ref()
                        .map_or_else(|| "all".to_string(), ToString::to_string);
                    self.last_error = Some(format!("{err} (theme '{theme}')"));
                    self.transition(SessionState::SelectingTheme);
                }
            },
            Err(err) => {
                log::warn!("deck load failed: {err}");
                self.fail(FailureReason::CatalogUnavailable);
            }
        }
    }

    // === Play ===

    /// Request a flip of the slot at `slot_index`.
    ///
    /// Guard-rejected requests (see module docs) return
    /// `FlipOutcome::Rejected` and change nothing.
    pub fn flip(&mut self, slot_index: usize) -> FlipOutcome {
        if !self.state.is_playing()
            || slot_index >= self.deck.len()
            || self.flipped.len() == 2
            || self.flipped.contains(&slot_index)
            || self.matched.contains(self.deck[slot_index].name())
        {
            log::debug!("flip({slot_index}) rejected in state '{}'", self.state);
            return FlipOutcome::Rejected;
        }

        self.flipped.push(slot_index);
        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        // Second flip: the pair is complete, count the move and resolve.
        self.moves += 1;
        let (first, second) = (self.flipped[0], self.flipped[1]);
        let outcome = MatchResolver::resolve(&self.deck, first, second);

        if outcome.is_match {
            let name = outcome.matched_name.unwrap_or_default();
            self.matched.insert(name.clone());
            self.flipped.clear();
            let won = self.matched.len() == pair_count(&self.deck);
            if won {
                self.transition(SessionState::Won);
            }
            FlipOutcome::Matched { name, won }
        } else {
            // Both slots stay face-up until the host fires this token.
            let timer = self.arm_timer();
            FlipOutcome::Mismatch { timer }
        }
    }

    /// Fire the mismatch-reveal timer.
    ///
    /// Clears the flip set iff `token` is the currently armed one; stale,
    /// superseded, or double-fired tokens are inert.
    pub fn timer_fired(&mut self, token: TimerToken) {
        if self.pending_clear != Some(token) || !self.state.is_playing() {
            log::debug!("dropping stale timer token {:?}", token);
            return;
        }
        self.pending_clear = None;
        self.flipped.clear();
    }

    // === Round control ===

    /// Return to theme selection, discarding the current round.
    ///
    /// Valid from `SelectingTheme`, `LoadingDeck`, `Playing`, and `Won`.
    /// Loaded themes are retained; deck, flips, matches, and move count are
    /// cleared and any outstanding load or timer is invalidated.
    pub fn reset(&mut self) {
        match self.state {
            SessionState::SelectingTheme
            | SessionState::LoadingDeck
            | SessionState::Playing
            | SessionState::Won => {
                self.bump_generation();
                self.clear_round();
                self.theme = None;
                self.last_error = None;
                self.transition(SessionState::SelectingTheme);
            }
            _ => log::warn!("reset ignored in state '{}'", self.state),
        }
    }

    /// Reload a fresh deck for the same theme.
    ///
    /// Valid from `Playing` and `Won`. Returns the deck fetch to fulfil.
    pub fn restart(&mut self) -> Option<CardRequest> {
        match self.state {
            SessionState::Playing | SessionState::Won => {
                let filter = self
                    .theme
                    .as_ref()
                    .map_or_else(CardFilter::all, ThemeChoice::to_filter);
                self.bump_generation();
                self.clear_round();
                self.transition(SessionState::LoadingDeck);
                Some(self.request(RequestKind::Deck, filter))
            }
            _ => {
                log::warn!("restart ignored in state '{}'", self.state);
                None
            }
        }
    }

    /// Re-enter `LoadingThemes` after a failure.
    ///
    /// Valid from `Failed` only. Returns the full-catalog fetch to fulfil.
    pub fn retry(&mut self) -> Option<CardRequest> {
        if !matches!(self.state, SessionState::Failed(_)) {
            log::warn!("retry ignored in state '{}'", self.state);
            return None;
        }
        self.bump_generation();
        self.clear_round();
        self.theme = None;
        self.last_error = None;
        self.transition(SessionState::LoadingThemes);
        Some(self.request(RequestKind::Themes, CardFilter::all()))
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current generation, for stamping host-side bookkeeping.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The deck being played. Empty outside a round.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Themes discovered at session start, first-seen order.
    #[must_use]
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Completed flip pairs this round.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs resolved so far this round.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched.len()
    }

    /// Check if the slot at `index` should render face-up.
    ///
    /// Derived, not stored: face-up iff the index is in the flip set or the
    /// slot's name is already matched.
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index)
            || self
                .deck
                .get(index)
                .is_some_and(|slot| self.matched.contains(slot.name()))
    }

    /// Retained error message, if any (insufficient theme, failure reason).
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(reason) => Some(reason.message()),
            _ => self.last_error.as_deref(),
        }
    }

    /// Read-only snapshot for the host UI.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let slots = self
            .deck
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotView {
                slot_id: slot.slot_id,
                card_id: slot.card.id,
                name: slot.card.name.clone(),
                image_ref: slot.card.image_ref.clone(),
                face_up: self.is_face_up(index),
            })
            .collect();

        SessionSnapshot {
            state: self.state.clone(),
            slots,
            moves: self.moves,
            matched_pairs: self.matched.len(),
            themes: self.themes.clone(),
            error: self.error_message().map(str::to_string),
        }
    }

    // === Internals ===

    fn transition(&mut self, next: SessionState) {
        log::debug!("session transition: '{}' -> '{}'", self.state, next);
        self.state = next;
        if let Some(observer) = &mut self.observer {
            observer(&self.state);
        }
    }

    fn fail(&mut self, reason: FailureReason) {
        self.clear_round();
        self.transition(SessionState::Failed(reason));
    }

    fn request(&self, kind: RequestKind, filter: CardFilter) -> CardRequest {
        CardRequest {
            generation: self.generation,
            kind,
            filter,
        }
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.next();
        // Anything scheduled under the old generation is now inert.
        self.pending_clear = None;
    }

    fn arm_timer(&mut self) -> TimerToken {
        self.timer_sequence += 1;
        let token = TimerToken {
            generation: self.generation,
            sequence: self.timer_sequence,
        };
        self.pending_clear = Some(token);
        token
    }

    fn clear_round(&mut self) {
        self.deck = Deck::new();
        self.flipped.clear();
        self.matched = ImHashSet::new();
        self.moves = 0;
        self.pending_clear = None;
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("deck_len", &self.deck.len())
            .field("flipped", &self.flipped)
            .field("matched_pairs", &self.matched.len())
            .field("moves", &self.moves)
            .finish_non_exhaustive()
    }
}
