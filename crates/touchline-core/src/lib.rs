//! # Touchline Core
//!
//! Core types, traits, and utilities for Touchline.
//! Provides the fundamental abstractions shared by the board engine and the
//! layout store: card geometry value types, the storage contract, the event
//! bus, and the error taxonomy.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod layout;
pub mod types;

pub use error::{Error, Result};

pub use geometry::{CardGeometry, PlayerPosition, PreviewSnapshot};

pub use layout::LayoutStore;

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, HistoryEvent,
    PreviewEvent, ScreenEvent, SelectionEvent, SubscriptionId,
};

// Re-export type aliases for convenience
pub use types::{shared, thread_safe, Shared, ThreadSafe, ThreadSafeRw};
