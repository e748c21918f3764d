//! # Touchline
//!
//! A management-simulation control panel built around a card-grid dashboard.
//! Cards are repositioned and resized on a snapped grid with live collision
//! previews, multi-selection, nested formation-player drags, and linear
//! undo/redo.
//!
//! ## Architecture
//!
//! Touchline is organized as a workspace with multiple crates:
//!
//! 1. **touchline-core** - Shared value types, storage contract, events, errors
//! 2. **touchline-board** - The card layout interaction engine
//! 3. **touchline-store** - Layout persistence and configuration
//! 4. **touchline** - This facade, re-exporting the public surface
//!
//! The board engine is single-threaded and synchronous: every pointer event
//! is handled to completion before the next, invalid gestures roll back to
//! the pre-gesture snapshot, and persistence is fire-and-forget.

pub use touchline_board as board;
pub use touchline_store as store;

pub use touchline_core::{
    AppEvent, CardGeometry, Error, EventBus, EventCategory, EventFilter, HistoryEvent,
    LayoutStore, PlayerPosition, PreviewEvent, PreviewSnapshot, Result, ScreenEvent,
    SelectionEvent,
};

pub use touchline_board::{
    BoardEngine, BoardViewport, Card, CardStore, CurrentGesture, FormationPlayer, GridMetrics,
    HistoryEntry, HistoryManager, ResizeHandle, SelectModifier, SelectionManager,
};

pub use touchline_store::{BoardConfig, FileLayoutStore, GridSettings, MemoryLayoutStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
