mod common;

use poke_index::cache::{RecordStore, Snapshot};
use poke_index::resolve::{Levenshtein, NameResolver};
use poke_index::types::RecordId;

use common::{rec, starters, CountingDistance};

fn installed(records: Vec<poke_index::types::Record>) -> std::sync::Arc<Snapshot> {
    let store = RecordStore::new();
    store.install(Snapshot::build(records).unwrap())
}

#[test]
fn misspelled_name_resolves_to_closest() {
    let snapshot = installed(starters());
    let resolver: NameResolver = NameResolver::default();

    assert_eq!(resolver.resolve("Bulbazaur", &snapshot), Some(RecordId::new(1)));
    assert_eq!(resolver.resolve("charmandr", &snapshot), Some(RecordId::new(4)));
}

#[test]
fn empty_snapshot_resolves_nothing() {
    let snapshot = installed(Vec::new());
    let resolver = NameResolver::new(Levenshtein);

    assert_eq!(resolver.resolve("Pikachu", &snapshot), None);
    assert_eq!(resolver.memo_len(), 0);
}

#[test]
fn empty_query_touches_nothing() {
    let snapshot = installed(starters());
    let distance = CountingDistance::default();
    let resolver = NameResolver::new(distance.clone());

    assert_eq!(resolver.resolve("", &snapshot), None);
    assert_eq!(distance.calls(), 0);
    assert_eq!(resolver.memo_len(), 0);
}

#[test]
fn repeated_query_is_memoized() {
    let snapshot = installed(starters());
    let distance = CountingDistance::default();
    let resolver = NameResolver::new(distance.clone());

    let first = resolver.resolve("Charmandar", &snapshot);
    let scans = distance.calls();
    assert!(scans > 0);

    let second = resolver.resolve("Charmandar", &snapshot);
    assert_eq!(first, second);
    assert_eq!(distance.calls(), scans, "second lookup must not compute distances");
    assert_eq!(resolver.memo_len(), 1);
}

#[test]
fn memo_keys_keep_original_case() {
    let snapshot = installed(starters());
    let distance = CountingDistance::default();
    let resolver = NameResolver::new(distance.clone());

    let lower = resolver.resolve("bulbasaur", &snapshot);
    let upper = resolver.resolve("BULBASAUR", &snapshot);

    assert_eq!(lower, Some(RecordId::new(1)));
    assert_eq!(upper, Some(RecordId::new(1)));
    assert_eq!(resolver.memo_len(), 2, "each spelling gets its own entry");
}

#[test]
fn ties_go_to_earliest_record() {
    // "Mew" and "Meow" are each one edit from "Mow".
    let snapshot = installed(vec![rec(151, "Mew"), rec(52, "Meow"), rec(150, "Mewtwo")]);
    let resolver: NameResolver = NameResolver::default();
    assert_eq!(resolver.resolve("Mow", &snapshot), Some(RecordId::new(151)));

    let reversed = installed(vec![rec(52, "Meow"), rec(151, "Mew")]);
    let resolver: NameResolver = NameResolver::default();
    assert_eq!(resolver.resolve("Mow", &reversed), Some(RecordId::new(52)));
}

#[test]
fn memo_from_older_snapshot_is_not_served() {
    let store = RecordStore::new();
    let resolver: NameResolver = NameResolver::default();

    let old = store.install(Snapshot::build(vec![rec(1, "Bulbasaur"), rec(2, "Pikachu")]).unwrap());
    assert_eq!(resolver.resolve("Bulbasaur", &old), Some(RecordId::new(1)));

    // Same names, different identifiers.
    let new = store.install(Snapshot::build(vec![rec(2, "Bulbasaur"), rec(1, "Pikachu")]).unwrap());
    assert_eq!(resolver.resolve("Bulbasaur", &new), Some(RecordId::new(2)));
}
