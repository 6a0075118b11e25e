//! Session state-machine tests.
//!
//! End-to-end scenarios over the public API: full rounds from start to
//! win, mismatch reveal timing, guard behavior under UI races, recoverable
//! theme errors, and staleness of superseded responses and timers.

use memoria::{
    Card, CardCatalogClient, CardFilter, CardId, CatalogError, DeckRng, FlipOutcome,
    GameSession, InMemoryCatalog, SessionDriver, SessionState, ThemeChoice,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn animal_cards() -> Vec<Card> {
    vec![
        Card::new(CardId::new(1), "Lion", "Animals", "img/lion"),
        Card::new(CardId::new(2), "Cat", "Animals", "img/cat"),
    ]
}

fn playing_session() -> GameSession {
    init_logs();
    let mut session = GameSession::new(DeckRng::seeded(42));
    let req = session.start().unwrap();
    session.resolve_themes(req.generation, Ok(animal_cards()));
    let req = session.select_theme(ThemeChoice::All).unwrap();
    session.resolve_deck(req.generation, Ok(animal_cards()));
    assert_eq!(*session.state(), SessionState::Playing);
    session
}

fn positions_of(session: &GameSession, name: &str) -> Vec<usize> {
    session
        .deck()
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.name() == name)
        .map(|(i, _)| i)
        .collect()
}

/// Canonical happy path: Lion pair, then Cat pair, then Won.
#[test]
fn test_two_pair_round_plays_to_win() {
    let mut session = playing_session();
    let lions = positions_of(&session, "Lion");
    let cats = positions_of(&session, "Cat");
    assert_eq!(session.deck().len(), 4);

    session.flip(lions[0]);
    let outcome = session.flip(lions[1]);
    assert_eq!(
        outcome,
        FlipOutcome::Matched {
            name: "Lion".into(),
            won: false
        }
    );
    assert_eq!(session.moves(), 1);
    assert_eq!(session.matched_pairs(), 1);
    // The flip set cleared synchronously: the next flip is accepted.
    assert_eq!(session.flip(cats[0]), FlipOutcome::Flipped);

    let outcome = session.flip(cats[1]);
    assert_eq!(
        outcome,
        FlipOutcome::Matched {
            name: "Cat".into(),
            won: true
        }
    );
    assert_eq!(session.moves(), 2);
    assert_eq!(*session.state(), SessionState::Won);
}

/// Mismatch: the move counts immediately, both slots stay revealed until
/// the scheduled clear fires, and nothing is matched.
#[test]
fn test_mismatch_reveal_then_scheduled_clear() {
    let mut session = playing_session();
    let lion = positions_of(&session, "Lion")[0];
    let cat = positions_of(&session, "Cat")[0];

    session.flip(lion);
    let timer = match session.flip(cat) {
        FlipOutcome::Mismatch { timer } => timer,
        other => panic!("expected mismatch, got {other:?}"),
    };

    assert_eq!(session.moves(), 1);
    assert!(session.is_face_up(lion));
    assert!(session.is_face_up(cat));

    session.timer_fired(timer);
    assert!(!session.is_face_up(lion));
    assert!(!session.is_face_up(cat));
    assert_eq!(session.matched_pairs(), 0);
    assert_eq!(*session.state(), SessionState::Playing);
}

/// Rapid double-click: flipping an already-face-up index never grows the
/// flip set past two and never double-increments the move counter.
#[test]
fn test_double_click_guard() {
    let mut session = playing_session();
    let lion = positions_of(&session, "Lion")[0];
    let cat = positions_of(&session, "Cat")[0];

    session.flip(lion);
    assert_eq!(session.flip(lion), FlipOutcome::Rejected);
    assert_eq!(session.moves(), 0);

    session.flip(cat); // completes the (mismatching) pair, moves = 1
    assert_eq!(session.moves(), 1);
    assert_eq!(session.flip(lion), FlipOutcome::Rejected);
    assert_eq!(session.flip(cat), FlipOutcome::Rejected);
    assert_eq!(session.moves(), 1);
}

/// An unknown theme is recoverable: back to theme selection with a
/// message, previous progress untouched.
#[test]
fn test_unknown_theme_recovers_to_selecting() {
    let mut session = playing_session();
    let lions = positions_of(&session, "Lion");
    session.flip(lions[0]);
    session.flip(lions[1]);
    assert_eq!(session.matched_pairs(), 1);

    // Win the round so theme selection is reachable again.
    let cats = positions_of(&session, "Cat");
    session.flip(cats[0]);
    session.flip(cats[1]);
    session.reset();

    let req = session
        .select_theme(ThemeChoice::Named("NonexistentTheme".into()))
        .unwrap();
    session.resolve_deck(req.generation, Ok(vec![]));

    assert_eq!(*session.state(), SessionState::SelectingTheme);
    assert!(session.error_message().is_some());
    assert_eq!(session.moves(), 0);
}

/// Generation token: a deck load fulfilled after reset() must not
/// overwrite the newer session state.
#[test]
fn test_stale_deck_load_cannot_resurrect_old_round() {
    init_logs();
    let mut session = GameSession::new(DeckRng::seeded(7));
    let req = session.start().unwrap();
    session.resolve_themes(req.generation, Ok(animal_cards()));

    let outstanding = session.select_theme(ThemeChoice::All).unwrap();
    session.reset();

    // The response for the superseded load finally arrives.
    session.resolve_deck(outstanding.generation, Ok(animal_cards()));
    assert_eq!(*session.state(), SessionState::SelectingTheme);
    assert!(session.deck().is_empty());

    // A fresh selection still works normally.
    let req = session.select_theme(ThemeChoice::All).unwrap();
    session.resolve_deck(req.generation, Ok(animal_cards()));
    assert_eq!(*session.state(), SessionState::Playing);
}

/// A reveal timer armed before a restart must not clear flips made in the
/// new round.
#[test]
fn test_stale_timer_cannot_touch_new_round() {
    let mut session = playing_session();
    let lion = positions_of(&session, "Lion")[0];
    let cat = positions_of(&session, "Cat")[0];

    session.flip(lion);
    let stale_timer = match session.flip(cat) {
        FlipOutcome::Mismatch { timer } => timer,
        other => panic!("expected mismatch, got {other:?}"),
    };

    let req = session.restart().unwrap();
    session.resolve_deck(req.generation, Ok(animal_cards()));

    session.flip(0);
    session.timer_fired(stale_timer);
    assert!(session.is_face_up(0), "stale timer cleared a fresh flip");
}

/// Observer ordering across a full session lifecycle.
#[test]
fn test_observer_fires_after_every_transition() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen: Rc<RefCell<Vec<SessionState>>> = Rc::default();
    let sink = Rc::clone(&seen);

    let mut session = GameSession::new(DeckRng::seeded(42));
    session.set_observer(move |state| sink.borrow_mut().push(state.clone()));

    let req = session.start().unwrap();
    session.resolve_themes(req.generation, Ok(animal_cards()));
    let req = session.select_theme(ThemeChoice::All).unwrap();
    session.resolve_deck(req.generation, Ok(animal_cards()));

    assert_eq!(
        *seen.borrow(),
        vec![
            SessionState::LoadingThemes,
            SessionState::SelectingTheme,
            SessionState::LoadingDeck,
            SessionState::Playing,
        ]
    );
}

/// Driver round trip: a full game against the in-memory catalog,
/// including a mismatch cleared by tick().
#[test]
fn test_driver_full_round() {
    init_logs();
    let mut catalog = InMemoryCatalog::new();
    catalog.insert("Lion", "Animals", "img/lion");
    catalog.insert("Cat", "Animals", "img/cat");
    catalog.insert("Mars", "Planets", "img/mars");
    catalog.insert("Venus", "Planets", "img/venus");

    let mut driver = SessionDriver::new(catalog, DeckRng::seeded(42));
    driver.start();
    assert_eq!(driver.session().themes(), ["Animals", "Planets"]);

    driver.select_theme(ThemeChoice::Named("Planets".into()));
    assert_eq!(*driver.session().state(), SessionState::Playing);
    assert_eq!(driver.snapshot().slots.len(), 4);

    // Mismatch two different names, then clear via tick and win.
    let mars = driver
        .session()
        .deck()
        .iter()
        .position(|s| s.name() == "Mars")
        .unwrap();
    let venus = driver
        .session()
        .deck()
        .iter()
        .position(|s| s.name() == "Venus")
        .unwrap();
    driver.flip(mars);
    driver.flip(venus);
    driver.tick();

    for name in ["Mars", "Venus"] {
        let slots: Vec<usize> = driver
            .session()
            .deck()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name() == name)
            .map(|(i, _)| i)
            .collect();
        driver.flip(slots[0]);
        driver.flip(slots[1]);
    }

    let snapshot = driver.snapshot();
    assert!(snapshot.is_won());
    assert_eq!(snapshot.moves, 3);
    assert_eq!(snapshot.matched_pairs, 2);
    assert!(snapshot.slots.iter().all(|s| s.face_up));
}

/// Transport failure is fatal to the attempt and recoverable only via an
/// explicit retry.
#[test]
fn test_catalog_outage_and_retry() {
    struct DownCatalog;
    impl CardCatalogClient for DownCatalog {
        fn fetch_cards(&self, _filter: &CardFilter) -> Result<Vec<Card>, CatalogError> {
            Err(CatalogError::Unavailable("backend not running".into()))
        }
    }

    let mut driver = SessionDriver::new(DownCatalog, DeckRng::seeded(1));
    driver.start();
    assert!(matches!(driver.session().state(), SessionState::Failed(_)));
    assert_eq!(driver.snapshot().error.as_deref(), Some("catalog unavailable"));

    // Flips and theme picks are dead in Failed.
    assert_eq!(driver.flip(0), FlipOutcome::Rejected);
    driver.select_theme(ThemeChoice::All);
    assert!(matches!(driver.session().state(), SessionState::Failed(_)));

    // Retry re-enters the load; the catalog is still down.
    driver.retry();
    assert!(matches!(driver.session().state(), SessionState::Failed(_)));
}
