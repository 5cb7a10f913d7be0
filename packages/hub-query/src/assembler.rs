//! Result Assembler
//!
//! Pure transforms from fetched rows to response shapes:
//!
//! | Shape              | Used by            | Embedding                    |
//! |--------------------|--------------------|------------------------------|
//! | `Resource`         | Query, List        | resource embeds latest       |
//! | `Version` (min)    | VersionsByID       | none                         |
//! | `Version` (full)   | ByTypeNameVersion  | version embeds resource      |
//!
//! A row without versions has no latest version and assembles to `None`.

use chrono::{DateTime, Utc};
use hub_storage::{ResourceRow, ResourceVersion};

use crate::types::{Catalog, LatestVersion, Resource, Tag, Version, VersionResource, Versions};
use crate::url::raw_url;

/// UTC timestamp as `YYYY-MM-DD HH:MM:SS[.fraction] +0000 UTC`
///
/// The fraction is printed only when non-zero, without trailing zeros.
pub fn format_updated_at(ts: &DateTime<Utc>) -> String {
    let base = ts.format("%Y-%m-%d %H:%M:%S");
    let nanos = ts.timestamp_subsec_nanos() % 1_000_000_000;

    if nanos == 0 {
        return format!("{} +0000 UTC", base);
    }
    let fraction = format!("{:09}", nanos);
    format!("{}.{} +0000 UTC", base, fraction.trim_end_matches('0'))
}

fn catalog_of(row: &ResourceRow) -> Catalog {
    Catalog {
        id: row.catalog.id,
        kind: row.catalog.kind.clone(),
    }
}

fn tags_of(row: &ResourceRow) -> Vec<Tag> {
    row.tags
        .iter()
        .map(|tag| Tag {
            id: tag.id,
            name: tag.name.clone(),
        })
        .collect()
}

/// Collection item: resource with its latest version
pub fn resource_summary(row: &ResourceRow) -> Option<Resource> {
    let latest = row.latest_version()?;

    Some(Resource {
        id: row.resource.id,
        name: row.resource.name.clone(),
        catalog: catalog_of(row),
        kind: row.resource.kind.clone(),
        rating: row.resource.rating,
        latest_version: LatestVersion {
            id: latest.id,
            version: latest.version.clone(),
            description: latest.description.clone(),
            display_name: latest.display_name.clone(),
            min_pipelines_version: latest.min_pipelines_version.clone(),
            web_url: latest.url.clone(),
            raw_url: raw_url(&latest.url),
            updated_at: format_updated_at(&latest.updated_at),
        },
        tags: tags_of(row),
    })
}

/// Minimal version projection: id, version and both URLs
pub fn min_version_info(version: &ResourceVersion) -> Version {
    Version {
        id: version.id,
        version: version.version.clone(),
        description: None,
        display_name: None,
        min_pipelines_version: None,
        web_url: version.url.clone(),
        raw_url: raw_url(&version.url),
        updated_at: None,
        resource: None,
    }
}

/// Every version (already ordered) plus the last one as latest
pub fn versions_info(all: &[ResourceVersion]) -> Option<Versions> {
    let latest = all.last()?;

    Some(Versions {
        latest: min_version_info(latest),
        versions: all.iter().map(min_version_info).collect(),
    })
}

/// Full projection of the row's first loaded version, embedding the resource
pub fn complete_version_info(row: &ResourceRow) -> Option<Version> {
    let version = row.versions.first()?;

    Some(Version {
        id: version.id,
        version: version.version.clone(),
        description: Some(version.description.clone()),
        display_name: Some(version.display_name.clone()),
        min_pipelines_version: Some(version.min_pipelines_version.clone()),
        web_url: version.url.clone(),
        raw_url: raw_url(&version.url),
        updated_at: Some(format_updated_at(&version.updated_at)),
        resource: Some(VersionResource {
            id: row.resource.id,
            name: row.resource.name.clone(),
            kind: row.resource.kind.clone(),
            rating: row.resource.rating,
            tags: tags_of(row),
            catalog: catalog_of(row),
        }),
    })
}
