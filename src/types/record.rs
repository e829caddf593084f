use serde::{Deserialize, Serialize};

use crate::types::identifiers::RecordId;

/// A normalized Pokémon entry.
///
/// Immutable once built; snapshots hand out shared references only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub national_dex_number: u32,
    /// HP, Attack, Defense, Sp. Atk, Sp. Def, Speed.
    pub base_stats: Vec<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, national_dex_number: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            national_dex_number,
            base_stats: Vec::new(),
            types: Vec::new(),
            abilities: Vec::new(),
        }
    }

    pub fn with_base_stats(mut self, stats: impl IntoIterator<Item = u32>) -> Self {
        self.base_stats = stats.into_iter().collect();
        self
    }

    pub fn with_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_abilities<S: Into<String>>(mut self, abilities: impl IntoIterator<Item = S>) -> Self {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }
}
