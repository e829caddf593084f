// This is intentionally thin:
// no partial mutation
// one write path (install)
// readers get a whole snapshot or nothing

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::cache::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct RecordStore {
    current: RwLock<Arc<Snapshot>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// Replace the live snapshot as a unit and return the published copy.
    ///
    /// The snapshot is stamped with the next generation while the write lock
    /// is held, so generations are strictly increasing in publish order.
    pub fn install(&self, mut snapshot: Snapshot) -> Arc<Snapshot> {
        let mut current = self.current.write();
        snapshot.stamp(current.generation() + 1, Utc::now());
        let published = Arc::new(snapshot);
        *current = Arc::clone(&published);
        published
    }

    /// The live snapshot. Holding the returned `Arc` pins that snapshot even
    /// if a newer one is installed meanwhile.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }
}
