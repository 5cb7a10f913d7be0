//! Fetch Specification
//!
//! A plain description of one fetch: which rows to match, in what order,
//! which related rows to resolve and how many rows to return. Adapters
//! interpret it; callers never see SQL or any other query-builder state.
//!
//! ```text
//! FetchSpec
//!   filters   AND-ed predicates, applied first
//!   order     ordering clauses, applied in sequence
//!   preload   related rows resolved per matched resource
//!   limit     cap applied last
//! ```

use serde::{Deserialize, Serialize};

use super::models::{ResourceId, ResourceRow, ResourceVersion};
use crate::{Result, StorageError};

/// Row set a fetch is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Resources,
    Versions,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Resources => "resources",
            Target::Versions => "resource versions",
        }
    }
}

/// Predicate over a single row
///
/// Case-insensitive variants hold their value already lower-cased; build
/// them through the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// `LOWER(type) = value`
    TypeEquals(String),
    /// `LOWER(name) = value`
    NameEquals(String),
    /// `LOWER(name) LIKE '%value%'`
    NameContains(String),
    /// Resource identity (`id` on resources, `resource_id` on versions)
    ResourceId(ResourceId),
    /// Resource has at least one version row (any version)
    HasVersions,
}

impl Filter {
    pub fn type_equals(kind: &str) -> Self {
        Filter::TypeEquals(kind.to_lowercase())
    }

    pub fn name_equals(name: &str) -> Self {
        Filter::NameEquals(name.to_lowercase())
    }

    pub fn name_contains(name: &str) -> Self {
        Filter::NameContains(name.to_lowercase())
    }

    pub fn applies_to(&self, target: Target) -> bool {
        match self {
            Filter::ResourceId(_) => true,
            Filter::TypeEquals(_)
            | Filter::NameEquals(_)
            | Filter::NameContains(_)
            | Filter::HasVersions => target == Target::Resources,
        }
    }

    /// Evaluate against a row holding all of its versions
    pub fn matches_row(&self, row: &ResourceRow) -> bool {
        let resource = &row.resource;
        match self {
            Filter::TypeEquals(kind) => resource.kind.to_lowercase() == *kind,
            Filter::NameEquals(name) => resource.name.to_lowercase() == *name,
            Filter::NameContains(name) => resource.name.to_lowercase().contains(name.as_str()),
            Filter::ResourceId(id) => resource.id == *id,
            Filter::HasVersions => !row.versions.is_empty(),
        }
    }

    pub fn matches_version(&self, version: &ResourceVersion) -> bool {
        match self {
            Filter::ResourceId(id) => version.resource_id == *id,
            _ => false,
        }
    }
}

/// Ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    /// `rating DESC, name ASC`
    RatingDescNameAsc,
    /// Version ordering rule, ascending
    VersionAsc,
}

impl OrderBy {
    pub fn applies_to(&self, target: Target) -> bool {
        match self {
            OrderBy::RatingDescNameAsc => target == Target::Resources,
            OrderBy::VersionAsc => target == Target::Versions,
        }
    }
}

/// Version subset resolved for each matched resource
///
/// Always ordered by the version ordering rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPreload {
    /// Only versions whose string equals this exactly
    pub exact: Option<String>,
}

impl VersionPreload {
    pub fn all() -> Self {
        Self { exact: None }
    }

    pub fn exact(version: impl Into<String>) -> Self {
        Self {
            exact: Some(version.into()),
        }
    }

    pub fn admits(&self, version: &ResourceVersion) -> bool {
        self.exact.as_deref().map_or(true, |v| version.version == v)
    }
}

/// Related rows resolved per matched resource (the catalog is always resolved)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preload {
    /// Tags ordered by name ascending
    pub tags: bool,
    pub versions: Option<VersionPreload>,
}

impl Preload {
    pub fn none() -> Self {
        Self::default()
    }

    /// Tags plus every version
    pub fn details() -> Self {
        Self {
            tags: true,
            versions: Some(VersionPreload::all()),
        }
    }
}

/// One fetch against the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchSpec {
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub preload: Preload,
    pub limit: Option<usize>,
}

impl FetchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn preload(mut self, preload: Preload) -> Self {
        self.preload = preload;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject clauses that have no meaning for the target row set
    pub fn check_target(&self, target: Target) -> Result<()> {
        if let Some(filter) = self.filters.iter().find(|f| !f.applies_to(target)) {
            return Err(StorageError::database(format!(
                "filter {:?} does not apply to {}",
                filter,
                target.as_str()
            )));
        }
        if let Some(order) = self.order.iter().find(|o| !o.applies_to(target)) {
            return Err(StorageError::database(format!(
                "ordering {:?} does not apply to {}",
                order,
                target.as_str()
            )));
        }
        Ok(())
    }

    pub fn matches_row(&self, row: &ResourceRow) -> bool {
        self.filters.iter().all(|f| f.matches_row(row))
    }

    pub fn matches_version(&self, version: &ResourceVersion) -> bool {
        self.filters.iter().all(|f| f.matches_version(version))
    }
}
