pub mod scheduler;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use scheduler::RefreshScheduler;

/// What a refresh trigger ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This trigger fetched and installed a new snapshot.
    Installed { generation: u64, records: usize },
    /// This trigger fetched, but the fetch failed; the old snapshot stays.
    Failed,
    /// Another attempt was already in flight; this trigger waited for it
    /// instead of fetching again.
    Joined,
}

/// Operator view of cache freshness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshStatus {
    pub ready: bool,
    pub generation: u64,
    pub record_count: usize,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
