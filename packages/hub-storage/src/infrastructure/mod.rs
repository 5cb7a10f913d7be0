//! Infrastructure layer - Storage adapters

pub mod memory_store;
pub use memory_store::InMemoryResourceStore;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;
#[cfg(feature = "sqlite")]
pub use sqlite_store::{SqliteResourceStore, SCHEMA};
