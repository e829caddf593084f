use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable numeric identifier of a record within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    pub const fn new(raw: u32) -> Self {
        RecordId(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for RecordId {
    fn from(raw: u32) -> Self {
        RecordId(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fold a name for comparison.
///
/// Case-folding only; no accent stripping or unicode normalization.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
