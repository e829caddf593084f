use crate::cache::Snapshot;
use crate::types::{fold_name, RecordId};

pub trait NameDistance {
    /// Distance between two already-folded names. Lower is closer.
    fn distance(&self, candidate: &str, query: &str) -> usize;
}

/// Levenshtein edit distance over unicode scalar values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Levenshtein;

impl NameDistance for Levenshtein {
    fn distance(&self, candidate: &str, query: &str) -> usize {
        strsim::levenshtein(candidate, query)
    }
}

impl<D: NameDistance + ?Sized> NameDistance for &D {
    fn distance(&self, candidate: &str, query: &str) -> usize {
        (**self).distance(candidate, query)
    }
}

/// Scan the snapshot in iteration order and return the closest record.
///
/// Only a strictly smaller distance replaces the current best, so the first
/// record at the minimal distance wins ties. An exact match ends the scan.
pub fn nearest<D: NameDistance>(distance: &D, query: &str, snapshot: &Snapshot) -> Option<RecordId> {
    let query = fold_name(query);
    let mut best: Option<(RecordId, usize)> = None;

    for record in snapshot.iter() {
        let d = distance.distance(&fold_name(&record.name), &query);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((record.id, d));
            if d == 0 {
                break;
            }
        }
    }

    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;

    fn snapshot(names: &[(u32, &str)]) -> Snapshot {
        Snapshot::build(names.iter().map(|&(id, name)| Record::new(id, name, id)).collect()).unwrap()
    }

    #[test]
    fn levenshtein_counts_edits() {
        assert_eq!(Levenshtein.distance("bulbasaur", "bulbazaur"), 1);
        assert_eq!(Levenshtein.distance("", "abc"), 3);
        assert_eq!(Levenshtein.distance("kitten", "sitting"), 3);
    }

    #[test]
    fn nearest_is_case_insensitive() {
        let snap = snapshot(&[(1, "Bulbasaur"), (4, "Charmander")]);
        assert_eq!(nearest(&Levenshtein, "CHARMANDER", &snap), Some(RecordId::new(4)));
    }

    #[test]
    fn first_record_wins_ties() {
        // "mew" is one edit from both.
        let snap = snapshot(&[(151, "Mew"), (150, "Mewtwo"), (52, "Meow")]);
        assert_eq!(nearest(&Levenshtein, "mow", &snap), Some(RecordId::new(151)));

        let reordered = snapshot(&[(52, "Meow"), (151, "Mew")]);
        assert_eq!(nearest(&Levenshtein, "mow", &reordered), Some(RecordId::new(52)));
    }

    #[test]
    fn empty_snapshot_has_no_nearest() {
        assert_eq!(nearest(&Levenshtein, "Pikachu", &Snapshot::empty()), None);
    }
}
