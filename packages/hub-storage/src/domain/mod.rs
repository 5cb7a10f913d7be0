//! Storage Domain Layer
//!
//! Models, the fetch specification and the store port

pub mod fetch;
pub mod models;
pub mod ports;

pub use fetch::{FetchSpec, Filter, OrderBy, Preload, Target, VersionPreload};
pub use models::{Catalog, EntityId, Resource, ResourceId, ResourceRow, ResourceVersion, Tag};
pub use ports::ResourceStore;
