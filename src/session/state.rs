//! Session states and staleness tokens.
//!
//! ## SessionState
//!
//! One exhaustive enum instead of independent loading/error/playing flags,
//! so impossible combinations ("loading" and "won" at once) cannot be
//! represented.
//!
//! ## Generation tokens
//!
//! The session suspends at two points (theme load, deck load) and owns one
//! scheduled transition (the mismatch reveal clear). Each outstanding
//! request and timer is stamped with the generation current when it was
//! issued; any superseding transition bumps the generation, so a stale
//! response or timer firing can never mutate the newer session state.

use serde::{Deserialize, Serialize};

use crate::catalog::CardFilter;

/// Why a session reached `Failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Transport failure fetching themes or deck.
    CatalogUnavailable,
    /// The catalog holds zero cards.
    EmptyCatalog,
}

impl FailureReason {
    /// Human-readable message for the host UI.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::CatalogUnavailable => "catalog unavailable",
            FailureReason::EmptyCatalog => "no cards registered",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The session state machine's current state. Exactly one is active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created, not yet started.
    Idle,
    /// Waiting for the full card set to derive themes from.
    LoadingThemes,
    /// Themes known; waiting for a theme choice.
    SelectingTheme,
    /// Waiting for theme-scoped cards to build the deck from.
    LoadingDeck,
    /// Deck built; accepting flips.
    Playing,
    /// All pairs matched. Terminal for the round.
    Won,
    /// Fatal failure. Terminal unless explicitly retried.
    Failed(FailureReason),
}

impl SessionState {
    /// Check if flips are currently accepted.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// Check if this state ends the round (`Won` or `Failed`).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Won | SessionState::Failed(_))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::LoadingThemes => write!(f, "loading themes"),
            SessionState::SelectingTheme => write!(f, "selecting theme"),
            SessionState::LoadingDeck => write!(f, "loading deck"),
            SessionState::Playing => write!(f, "playing"),
            SessionState::Won => write!(f, "won"),
            SessionState::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Monotone marker distinguishing session instances.
///
/// Bumped on every transition that invalidates outstanding work (theme
/// selection, reset, restart, retry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation a fresh session starts at.
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The next generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What a `CardRequest` is fetching for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    /// Full card set, to derive the theme list.
    Themes,
    /// Theme-scoped card set, to build a deck.
    Deck,
}

/// An outstanding catalog fetch the host must fulfil.
///
/// The host performs the fetch and feeds the result back through
/// `GameSession::resolve_themes` or `resolve_deck` together with the
/// request's generation. Responses carrying a stale generation are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequest {
    /// Generation current when the request was issued.
    pub generation: Generation,
    /// Which resolve method the response belongs to.
    pub kind: RequestKind,
    /// Filter to fetch with.
    pub filter: CardFilter,
}

/// Handle for the scheduled mismatch-reveal clear.
///
/// Returned from a mismatching second flip; the host schedules its reveal
/// delay and calls `GameSession::timer_fired` with the token. Only the
/// currently armed token has any effect - superseded or double-fired tokens
/// are inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken {
    pub(crate) generation: Generation,
    pub(crate) sequence: u64,
}
