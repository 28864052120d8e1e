//! The user's local "my cards" selection

use super::model::{Card, CardId};
use std::collections::BTreeMap;

/// Cards the user has marked, keyed by id
///
/// Presence of an id means selected. Values are replaced wholesale on every
/// change; entries never expire on their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCardSelection {
    by_id: BTreeMap<CardId, Card>,
}

impl UserCardSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with `card` inserted, overwriting any previous entry for its id
    pub fn with(&self, card: Card) -> Self {
        let mut by_id = self.by_id.clone();
        by_id.insert(card.id.clone(), card);
        Self { by_id }
    }

    /// Copy with `id` removed
    pub fn without(&self, id: &CardId) -> Self {
        let mut by_id = self.by_id.clone();
        by_id.remove(id);
        Self { by_id }
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.by_id.values()
    }
}
