//! Payload and response types of the resource service
//!
//! Responses serialize in camelCase, with `webURL`/`rawURL` keys. Fields a
//! projection does not carry are omitted rather than sent as null.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Payloads
// ═══════════════════════════════════════════════════════════════════════════

/// Search by name substring and/or type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// Case-insensitive substring of the resource name (empty = any)
    #[serde(default)]
    pub name: String,

    /// Case-insensitive resource type (empty = any)
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Maximum number of resources (None = configured default)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl QueryPayload {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// List every resource, best rated first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayload {
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListPayload {
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsByIdPayload {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByTypeNameVersionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub version: String,
}

impl ByTypeNameVersionPayload {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

/// Latest version projection embedded in a collection item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVersion {
    pub id: u32,
    pub version: String,
    pub description: String,
    pub display_name: String,
    pub min_pipelines_version: String,
    #[serde(rename = "webURL")]
    pub web_url: String,
    #[serde(rename = "rawURL")]
    pub raw_url: String,
    pub updated_at: String,
}

/// Collection item returned by Query and List
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u32,
    pub name: String,
    pub catalog: Catalog,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub latest_version: LatestVersion,
    pub tags: Vec<Tag>,
}

pub type ResourceCollection = Vec<Resource>;

/// Resource summary embedded in a single-version item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionResource {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub tags: Vec<Tag>,
    pub catalog: Catalog,
}

/// One version of a resource
///
/// The minimal projection (VersionsByID) carries only id, version and the
/// two URLs; the full projection (ByTypeNameVersion) fills every field and
/// embeds the owning resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: u32,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pipelines_version: Option<String>,
    #[serde(rename = "webURL")]
    pub web_url: String,
    #[serde(rename = "rawURL")]
    pub raw_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<VersionResource>,
}

/// Every version of a resource plus the latest one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versions {
    pub latest: Version,
    pub versions: Vec<Version>,
}
