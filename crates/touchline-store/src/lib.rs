//! # Touchline Store
//!
//! Persistence for the Touchline dashboard: the file-backed layout store
//! (committed card geometry and formation-player positions, keyed by screen
//! and card) and the board configuration layer.
//!
//! The layout store degrades gracefully in both directions: unreadable
//! files load as an empty store, and saves are atomic (write-to-temp, then
//! rename) so a crash never leaves a corrupt file behind.

pub mod config;
pub mod error;
pub mod layout_store;

pub use config::{BoardConfig, GridSettings};
pub use error::{StoreError, StoreResult};
pub use layout_store::{FileLayoutStore, MemoryLayoutStore};
