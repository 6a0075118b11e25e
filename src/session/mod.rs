//! Game session: the state machine coordinating a round.
//!
//! ## Key Types
//!
//! - `SessionState`: exhaustive state enum (idle through won/failed)
//! - `GameSession`: sans-IO state machine; hosts fulfil its `CardRequest`s
//!   and schedule its `TimerToken`s
//! - `FlipOutcome`: what a flip request did
//! - `MatchResolver`: pure match decision over two deck indices
//! - `SessionSnapshot`: read-only projection for rendering
//! - `SessionDriver`: synchronous client-backed runner

pub mod driver;
pub mod game;
pub mod resolver;
pub mod snapshot;
pub mod state;

pub use driver::SessionDriver;
pub use game::{FlipOutcome, GameSession, StateObserver};
pub use resolver::{MatchOutcome, MatchResolver};
pub use snapshot::{SessionSnapshot, SlotView};
pub use state::{
    CardRequest, FailureReason, Generation, RequestKind, SessionState, TimerToken,
};
