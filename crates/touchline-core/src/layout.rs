//! Storage contract for committed layout state.
//!
//! The board engine persists geometry and formation-player positions through
//! this trait after every committed change. Implementations are expected to
//! degrade gracefully: a missing or unreadable backing file means "no stored
//! state", never an error on the interactive path.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::geometry::{CardGeometry, PlayerPosition};

/// Keyed access to last-committed card geometry and nested player positions,
/// screen by screen.
///
/// `flush` is the only fallible operation; reads fall back to `None` and
/// writes mutate in-memory state that a later `flush` makes durable. The
/// engine treats `flush` as fire-and-forget best-effort.
pub trait LayoutStore: Send {
    /// Last committed geometry for a card, if any was ever stored.
    fn geometry(&self, screen_id: &str, card_id: &str) -> Option<CardGeometry>;

    /// Records the committed geometry for a card.
    fn set_geometry(&mut self, screen_id: &str, card_id: &str, geometry: CardGeometry);

    /// Last committed player positions for a formation card, if any.
    fn player_positions(
        &self,
        screen_id: &str,
        card_id: &str,
    ) -> Option<BTreeMap<String, PlayerPosition>>;

    /// Records the committed player positions for a formation card.
    fn set_player_positions(
        &mut self,
        screen_id: &str,
        card_id: &str,
        positions: BTreeMap<String, PlayerPosition>,
    );

    /// Drops all stored state for a screen (geometry and players).
    fn reset_screen(&mut self, screen_id: &str);

    /// Makes the current state durable.
    fn flush(&mut self) -> Result<()>;
}

/// A store behind a [`ThreadSafe`](crate::types::ThreadSafe) lock is itself
/// a store. Hosts that offload persistence to a background task hand the
/// engine one handle and keep another for flushing.
impl<S: LayoutStore> LayoutStore for crate::types::ThreadSafe<S> {
    fn geometry(&self, screen_id: &str, card_id: &str) -> Option<CardGeometry> {
        self.lock().geometry(screen_id, card_id)
    }

    fn set_geometry(&mut self, screen_id: &str, card_id: &str, geometry: CardGeometry) {
        self.lock().set_geometry(screen_id, card_id, geometry)
    }

    fn player_positions(
        &self,
        screen_id: &str,
        card_id: &str,
    ) -> Option<BTreeMap<String, PlayerPosition>> {
        self.lock().player_positions(screen_id, card_id)
    }

    fn set_player_positions(
        &mut self,
        screen_id: &str,
        card_id: &str,
        positions: BTreeMap<String, PlayerPosition>,
    ) {
        self.lock().set_player_positions(screen_id, card_id, positions)
    }

    fn reset_screen(&mut self, screen_id: &str) {
        self.lock().reset_screen(screen_id)
    }

    fn flush(&mut self) -> Result<()> {
        self.lock().flush()
    }
}
