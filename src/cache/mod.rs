pub mod expiry;
pub mod snapshot;
pub mod store;

pub use expiry::Expiry;
pub use snapshot::{Snapshot, SnapshotError};
pub use store::RecordStore;
