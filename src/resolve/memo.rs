use std::collections::HashMap;

use crate::types::RecordId;

/// Query string to resolved identifier, valid for one snapshot generation.
///
/// Keys are the raw query as supplied (not folded). Entries from another
/// generation are never served, and a stale reader can't write into a newer
/// generation's table.
#[derive(Debug, Default)]
pub struct NameMemo {
    generation: u64,
    entries: HashMap<String, RecordId>,
}

impl NameMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, generation: u64, query: &str) -> Option<RecordId> {
        if generation != self.generation {
            return None;
        }
        self.entries.get(query).copied()
    }

    pub fn remember(&mut self, generation: u64, query: &str, id: RecordId) {
        if generation > self.generation {
            self.reset(generation);
        }
        if generation == self.generation {
            self.entries.insert(query.to_owned(), id);
        }
    }

    /// Drop every entry and bind the memo to `generation`.
    pub fn reset(&mut self, generation: u64) {
        if generation < self.generation {
            return;
        }
        self.generation = generation;
        self.entries.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_sensitive() {
        let mut memo = NameMemo::new();
        memo.remember(0, "pikachu", RecordId::new(25));
        assert_eq!(memo.lookup(0, "pikachu"), Some(RecordId::new(25)));
        assert_eq!(memo.lookup(0, "Pikachu"), None);
    }

    #[test]
    fn other_generations_are_ignored() {
        let mut memo = NameMemo::new();
        memo.remember(1, "mew", RecordId::new(151));
        assert_eq!(memo.lookup(2, "mew"), None);

        // Newer generation wins; the old entries are gone.
        memo.remember(2, "eevee", RecordId::new(133));
        assert_eq!(memo.generation(), 2);
        assert_eq!(memo.lookup(2, "mew"), None);

        // A reader still on generation 1 doesn't pollute generation 2.
        memo.remember(1, "mew", RecordId::new(151));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn reset_clears() {
        let mut memo = NameMemo::new();
        memo.remember(3, "ditto", RecordId::new(132));
        memo.reset(4);
        assert!(memo.is_empty());
        assert_eq!(memo.generation(), 4);
    }
}
