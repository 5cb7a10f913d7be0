//! Resource catalog query service
//!
//! Answers four read-only questions about a catalog of versioned, tagged
//! resources:
//!
//! 1. **Query**: search by name substring and/or type
//! 2. **List**: everything, best rated first
//! 3. **VersionsByID**: full version history of one resource
//! 4. **ByTypeNameVersion**: one (type, name, version) with its resource
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_query::{HubConfig, QueryPayload, ResourceApi, ResourceService};
//!
//! let config = HubConfig::from_file("hub.yaml")?.with_env_overrides()?;
//! hub_query::telemetry::init_tracing(&config.log)?;
//!
//! let service = ResourceService::open(&config)?;
//! let tasks = service.query(&QueryPayload::new("build", "task")).await?;
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod filters;
pub mod service;
pub mod telemetry;
pub mod types;
pub mod url;

pub use config::{DatabaseConfig, HubConfig, LogConfig, QueryConfig};
pub use error::{ConfigError, Result, ServiceError};
pub use filters::{compose, Scope};
pub use service::{ResourceApi, ResourceService};
pub use types::{
    ByTypeNameVersionPayload, Catalog, LatestVersion, ListPayload, QueryPayload, Resource,
    ResourceCollection, Tag, Version, VersionResource, Versions, VersionsByIdPayload,
};
pub use url::raw_url;
