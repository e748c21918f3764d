//! Insertion-ordered arena of cards keyed by stable string identifiers.
//!
//! Iteration order matches the order cards were registered for the active
//! screen, which is also the presentation stacking order.

use std::collections::HashMap;

use crate::model::Card;

/// Owns the cards of the active screen.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: HashMap<String, Card>,
    order: Vec<String>,
}

impl CardStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.order.clear();
    }

    /// Inserts a card, replacing any existing card with the same id while
    /// keeping its position in the order.
    pub fn insert(&mut self, card: Card) {
        if !self.cards.contains_key(&card.id) {
            self.order.push(card.id.clone());
        }
        self.cards.insert(card.id.clone(), card);
    }

    /// Number of tracked cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether a card with this id is tracked.
    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    /// Borrows a card by id.
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Mutably borrows a card by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    /// Card ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Mutable iteration over all cards (order unspecified).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.values_mut()
    }
}
