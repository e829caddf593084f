pub mod identifiers;
pub mod record;

pub use identifiers::{fold_name, RecordId};
pub use record::Record;
