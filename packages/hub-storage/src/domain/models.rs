//! Catalog Domain Models
//!
//! Read-only snapshots of store-owned rows. Nothing in this crate creates,
//! updates or deletes them; they are fetched per request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier shared by every catalog entity
pub type EntityId = u32;

/// Resource ID (primary key of `resources`)
pub type ResourceId = EntityId;

/// Origin/category grouping of resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: EntityId,

    /// Catalog name (e.g., "tekton")
    pub name: String,

    /// Catalog type (e.g., "official", "community")
    #[serde(rename = "type")]
    pub kind: String,
}

impl Catalog {
    pub fn new(id: EntityId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Free-text discovery label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
}

impl Tag {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Resource Entity
///
/// A named, rated, versioned entry that belongs to exactly one catalog.
/// `kind` is a free-text category compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource ID (primary key)
    pub id: ResourceId,

    pub name: String,

    /// Category (e.g., "task", "pipeline")
    #[serde(rename = "type")]
    pub kind: String,

    pub rating: f64,

    /// Owning catalog (foreign key)
    pub catalog_id: EntityId,
}

impl Resource {
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        kind: impl Into<String>,
        rating: f64,
        catalog_id: EntityId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            rating,
            catalog_id,
        }
    }
}

/// One immutable release snapshot of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceVersion {
    pub id: EntityId,

    /// Back-reference to the resource (foreign key)
    pub resource_id: ResourceId,

    /// Dot-separated integer sequence (e.g., "1.10.2")
    pub version: String,

    pub description: String,

    pub display_name: String,

    pub min_pipelines_version: String,

    /// Web-facing source repository URL
    pub url: String,

    pub updated_at: DateTime<Utc>,
}

impl ResourceVersion {
    /// Create a version with empty descriptive fields
    pub fn new(
        id: EntityId,
        resource_id: ResourceId,
        version: impl Into<String>,
        url: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resource_id,
            version: version.into(),
            description: String::new(),
            display_name: String::new(),
            min_pipelines_version: String::new(),
            url: url.into(),
            updated_at,
        }
    }

    pub fn with_details(
        mut self,
        description: impl Into<String>,
        display_name: impl Into<String>,
        min_pipelines_version: impl Into<String>,
    ) -> Self {
        self.description = description.into();
        self.display_name = display_name.into();
        self.min_pipelines_version = min_pipelines_version.into();
        self
    }
}

/// A fetched resource with its related rows resolved
///
/// Which tags and versions are present depends on the `Preload` of the
/// fetch that produced the row; the catalog is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRow {
    pub resource: Resource,
    pub catalog: Catalog,

    /// Ordered by name ascending
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Ordered by the version ordering rule
    #[serde(default)]
    pub versions: Vec<ResourceVersion>,
}

impl ResourceRow {
    pub fn new(resource: Resource, catalog: Catalog) -> Self {
        Self {
            resource,
            catalog,
            tags: Vec::new(),
            versions: Vec::new(),
        }
    }

    /// Last version under the ordering rule, if any were loaded
    pub fn latest_version(&self) -> Option<&ResourceVersion> {
        self.versions.last()
    }
}
