//! Resource catalog storage
//!
//! The storage side of the hub: read-only models, the `FetchSpec` a query
//! is expressed as, the `ResourceStore` port and its adapters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_storage::{FetchSpec, Filter, OrderBy, Preload, ResourceStore, SqliteResourceStore};
//!
//! let store = SqliteResourceStore::open("hub.db")?;
//!
//! let spec = FetchSpec::new()
//!     .filter(Filter::type_equals("Task"))
//!     .order_by(OrderBy::RatingDescNameAsc)
//!     .preload(Preload::details())
//!     .limit(10);
//!
//! for row in store.fetch_resources(&spec).await? {
//!     println!("{} {:?}", row.resource.name, row.latest_version());
//! }
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod version;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{
    Catalog, EntityId, FetchSpec, Filter, OrderBy, Preload, Resource, ResourceId, ResourceRow,
    ResourceStore, ResourceVersion, Tag, Target, VersionPreload,
};
pub use version::{compare_versions, sort_versions, VersionKey};

pub use infrastructure::InMemoryResourceStore;
#[cfg(feature = "sqlite")]
pub use infrastructure::{SqliteResourceStore, SCHEMA};
