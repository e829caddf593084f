pub mod pokeapi;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::SnapshotError;
use crate::types::Record;

pub use pokeapi::PokeApiProvider;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned errors: {0}")]
    Api(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// The external source of records.
///
/// One operation: hand over the complete, current set. Any failure means
/// "this refresh failed"; the cache keeps serving what it had.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;
}
