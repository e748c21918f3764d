//! Card selection state and selection-modifier semantics.
//!
//! `SelectionManager` owns the set of selected card identifiers and keeps
//! the per-card `selected` flags in sync so the presentation layer can read
//! either. Every mutating operation reports whether membership actually
//! changed; the board engine emits a notification only in that case.

use std::collections::HashSet;

use crate::card_store::CardStore;
use crate::model::SelectModifier;

/// Tracks the active card set.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: HashSet<String>,
}

impl SelectionManager {
    /// Creates a manager with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a card is currently selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected cards.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selection membership, unordered.
    pub fn ids(&self) -> &HashSet<String> {
        &self.selected
    }

    /// The selection membership, sorted for deterministic notification
    /// payloads.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Applies a click with the given modifier. Unknown card ids are
    /// ignored. Returns true if membership changed.
    ///
    /// `Replace` on a card that is already the sole selection is a no-op;
    /// in every other case `Replace` leaves exactly that card selected.
    pub fn select(&mut self, store: &mut CardStore, id: &str, modifier: SelectModifier) -> bool {
        if !store.contains(id) {
            tracing::debug!("Ignoring selection of unknown card '{}'", id);
            return false;
        }

        let changed = match modifier {
            SelectModifier::Replace => {
                if self.selected.len() == 1 && self.selected.contains(id) {
                    false
                } else {
                    self.selected.clear();
                    self.selected.insert(id.to_string());
                    true
                }
            }
            SelectModifier::Add => self.selected.insert(id.to_string()),
            SelectModifier::Toggle => {
                if !self.selected.remove(id) {
                    self.selected.insert(id.to_string());
                }
                true
            }
        };

        if changed {
            self.sync_flags(store);
        }
        changed
    }

    /// Empties the selection. Returns true if it was non-empty.
    pub fn clear(&mut self, store: &mut CardStore) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        self.sync_flags(store);
        true
    }

    /// Selects every tracked card. Returns true if membership changed.
    pub fn select_all(&mut self, store: &mut CardStore) -> bool {
        let all: HashSet<String> = store.ids().cloned().collect();
        if all == self.selected {
            return false;
        }
        self.selected = all;
        self.sync_flags(store);
        true
    }

    /// Drops all selection state without touching card flags. Used when the
    /// card collection itself is replaced.
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    fn sync_flags(&self, store: &mut CardStore) {
        for card in store.iter_mut() {
            card.selected = self.selected.contains(&card.id);
        }
    }
}
