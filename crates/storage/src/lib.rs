pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod rowstore;

pub use error::{Result, StorageError};
pub use memory::InMemoryRowStore;
pub use rowstore::{RowStore, Table};

/// Current UTC time as an RFC3339 string, the timestamp format every
/// table stores in its `created_at` column.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
