//! Undo/redo over committed layout transactions.
//!
//! Entries capture both sides of a change (geometry and player positions)
//! with deterministically sorted lists, so equality comparison is
//! order-independent. Committing while redo entries exist discards them,
//! the standard branching-history invalidation.

use touchline_core::constants::MAX_HISTORY_DEPTH;
use touchline_core::geometry::{CardGeometry, PlayerPosition};

/// One atomic, undoable unit of committed change.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Human-readable label, e.g. "Move 2 cards".
    pub label: String,
    /// Geometry by card id, sorted by card id.
    pub geometry_before: Vec<(String, CardGeometry)>,
    pub geometry_after: Vec<(String, CardGeometry)>,
    /// Player positions as (card id, player id, position), sorted by card
    /// id then player id.
    pub players_before: Vec<(String, String, PlayerPosition)>,
    pub players_after: Vec<(String, String, PlayerPosition)>,
}

impl HistoryEntry {
    /// Builds a geometry-only entry.
    pub fn geometry(
        label: impl Into<String>,
        mut before: Vec<(String, CardGeometry)>,
        mut after: Vec<(String, CardGeometry)>,
    ) -> Self {
        before.sort_by(|a, b| a.0.cmp(&b.0));
        after.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            label: label.into(),
            geometry_before: before,
            geometry_after: after,
            players_before: Vec::new(),
            players_after: Vec::new(),
        }
    }

    /// Builds a players-only entry scoped to one card.
    pub fn players(
        label: impl Into<String>,
        card_id: &str,
        before: Vec<(String, PlayerPosition)>,
        after: Vec<(String, PlayerPosition)>,
    ) -> Self {
        let expand = |positions: Vec<(String, PlayerPosition)>| {
            let mut rows: Vec<(String, String, PlayerPosition)> = positions
                .into_iter()
                .map(|(player_id, position)| (card_id.to_string(), player_id, position))
                .collect();
            rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            rows
        };
        Self {
            label: label.into(),
            geometry_before: Vec::new(),
            geometry_after: Vec::new(),
            players_before: expand(before),
            players_after: expand(after),
        }
    }

    /// Whether the entry carries no net change.
    pub fn is_noop(&self) -> bool {
        self.geometry_before == self.geometry_after && self.players_before == self.players_after
    }
}

/// Linear undo/redo stacks with bounded depth.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl HistoryManager {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a committed change. No-op entries are dropped. Any pending
    /// redo entries are discarded. Returns true if the entry was recorded.
    pub fn commit(&mut self, entry: HistoryEntry) -> bool {
        if entry.is_noop() {
            return false;
        }
        self.undo.push(entry);
        self.redo.clear();
        if self.undo.len() > MAX_HISTORY_DEPTH {
            let excess = self.undo.len() - MAX_HISTORY_DEPTH;
            self.undo.drain(0..excess);
        }
        true
    }

    /// Pops the most recent entry for the caller to apply its `before`
    /// state, moving it onto the redo stack.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo.pop()?;
        self.redo.push(entry.clone());
        Some(entry)
    }

    /// Pops the most recently undone entry for the caller to apply its
    /// `after` state, moving it back onto the undo stack.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry.clone());
        Some(entry)
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the entry `undo` would apply.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.last().map(|e| e.label.as_str())
    }

    /// Label of the entry `redo` would apply.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo.last().map(|e| e.label.as_str())
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Depth of the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drops both stacks. Used when the active screen's card set changes.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
