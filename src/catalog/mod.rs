//! Card catalog: records, read contract, and theme discovery.
//!
//! ## Key Types
//!
//! - `Card` / `CardId`: catalog snapshot records; `name` is the matching key
//! - `CardFilter` / `ThemeChoice`: theme scoping for fetches
//! - `CardCatalogClient`: the narrow read contract the session depends on
//! - `InMemoryCatalog`: reference client, insertion-order-preserving
//! - `ThemeCatalog`: distinct themes in first-seen order

pub mod card;
pub mod client;
pub mod memory;
pub mod themes;

pub use card::{Card, CardFilter, CardId, ThemeChoice};
pub use client::{CardCatalogClient, CatalogError};
pub use memory::InMemoryCatalog;
pub use themes::ThemeCatalog;
