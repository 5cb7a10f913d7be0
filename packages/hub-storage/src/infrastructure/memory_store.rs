//! In-Memory Resource Store (for testing)
//!
//! Vec-backed implementation of the full `FetchSpec` semantics.
//! NOT for production use.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::{
    FetchSpec, OrderBy, ResourceRow, ResourceStore, ResourceVersion, Tag, Target,
};
use crate::version::sort_versions;
use crate::{Result, StorageError};

#[derive(Clone, Default)]
pub struct InMemoryResourceStore {
    /// Rows with every tag and version attached, in insertion order
    rows: Arc<RwLock<Vec<ResourceRow>>>,
    /// When set, every fetch fails with this message
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = ResourceRow>) -> Self {
        let store = Self::new();
        store.rows.write().extend(rows);
        store
    }

    /// Add a resource together with all of its tags and versions
    pub fn insert(&self, row: ResourceRow) {
        self.rows.write().push(row);
    }

    /// Make every subsequent fetch fail as a database error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.read().as_ref() {
            Some(message) => Err(StorageError::database(message.clone())),
            None => Ok(()),
        }
    }

    fn resolve(&self, spec: &FetchSpec) -> Result<Vec<ResourceRow>> {
        self.check_failure()?;
        spec.check_target(Target::Resources)?;

        let mut matched: Vec<ResourceRow> = self
            .rows
            .read()
            .iter()
            .filter(|row| spec.matches_row(row))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            spec.order
                .iter()
                .fold(Ordering::Equal, |acc, order| acc.then_with(|| compare_rows(*order, a, b)))
        });

        if let Some(limit) = spec.limit {
            matched.truncate(limit);
        }

        for row in &mut matched {
            if spec.preload.tags {
                row.tags.sort_by(compare_tags);
            } else {
                row.tags.clear();
            }

            match &spec.preload.versions {
                Some(preload) => {
                    row.versions.retain(|v| preload.admits(v));
                    sort_versions(&mut row.versions)?;
                }
                None => row.versions.clear(),
            }
        }

        Ok(matched)
    }
}

fn compare_rows(order: OrderBy, a: &ResourceRow, b: &ResourceRow) -> Ordering {
    match order {
        OrderBy::RatingDescNameAsc => b
            .resource
            .rating
            .total_cmp(&a.resource.rating)
            .then_with(|| a.resource.name.cmp(&b.resource.name)),
        // Rejected by check_target for resources
        OrderBy::VersionAsc => Ordering::Equal,
    }
}

fn compare_tags(a: &Tag, b: &Tag) -> Ordering {
    a.name.cmp(&b.name)
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn fetch_resources(&self, spec: &FetchSpec) -> Result<Vec<ResourceRow>> {
        self.resolve(spec)
    }

    async fn first_resource(&self, spec: &FetchSpec) -> Result<ResourceRow> {
        let first = spec.clone().limit(1);
        self.resolve(&first)?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::record_not_found("resource"))
    }

    async fn fetch_versions(&self, spec: &FetchSpec) -> Result<Vec<ResourceVersion>> {
        self.check_failure()?;
        spec.check_target(Target::Versions)?;

        let mut versions: Vec<ResourceVersion> = self
            .rows
            .read()
            .iter()
            .flat_map(|row| row.versions.iter())
            .filter(|v| spec.matches_version(v))
            .cloned()
            .collect();

        if spec.order.contains(&OrderBy::VersionAsc) {
            sort_versions(&mut versions)?;
        }
        if let Some(limit) = spec.limit {
            versions.truncate(limit);
        }
        Ok(versions)
    }
}
