pub mod distance;
pub mod memo;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::Snapshot;
use crate::types::RecordId;
pub use distance::{nearest, Levenshtein, NameDistance};
pub use memo::NameMemo;

/// Resolves free-text names to the identifier of the closest record and
/// memoizes the answer per snapshot generation.
#[derive(Debug)]
pub struct NameResolver<D = Levenshtein> {
	distance: D,
	memo: Mutex<NameMemo>,
}

impl Default for NameResolver<Levenshtein> {
	fn default() -> Self {
		Self::new(Levenshtein)
	}
}

impl<D> NameResolver<D>
where
	D: NameDistance,
{
	pub fn new(distance: D) -> Self {
		Self {
			distance,
			memo: Mutex::new(NameMemo::new()),
		}
	}

	pub fn resolve(&self, query: &str, snapshot: &Snapshot) -> Option<RecordId> {
		if query.is_empty() {
			return None;
		}

		let generation = snapshot.generation();
		if let Some(id) = self.memo.lock().lookup(generation, query) {
			debug!(query, %id, generation, "name memo hit");
			return Some(id);
		}

		// Scan without holding the memo lock; concurrent misses on the same
		// query compute the same answer.
		let id = nearest(&self.distance, query, snapshot)?;
		self.memo.lock().remember(generation, query, id);
		Some(id)
	}

	/// Discard all memoized resolutions and bind the memo to `generation`.
	pub fn reset(&self, generation: u64) {
		self.memo.lock().reset(generation);
	}

	pub fn memo_len(&self) -> usize {
		self.memo.lock().len()
	}
}
