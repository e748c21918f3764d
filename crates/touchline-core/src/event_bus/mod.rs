//! # Event Bus Module
//!
//! Publish/subscribe distribution of engine notifications to the
//! presentation layer:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both sync handlers and async broadcast receivers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use touchline_core::event_bus::{EventBus, AppEvent, EventFilter, EventCategory};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let AppEvent::Selection(sel) = event {
//!             println!("Selection event: {:?}", sel);
//!         }
//!     },
//! );
//!
//! // ... engine publishes as the user interacts ...
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
