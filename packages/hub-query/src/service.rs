//! Resource Service
//!
//! The four read operations of the hub. Each one is a stateless two-stage
//! transform:
//!
//! ```text
//! payload -> scopes -> FetchSpec -> store -> rows -> assembler -> response
//!                                      |
//!                                      +-> no rows      -> NotFound
//!                                      +-> store error  -> Internal (logged)
//! ```
//!
//! The service holds only a shared handle to the store and its limits, so
//! one instance can serve any number of concurrent callers.

use async_trait::async_trait;
use hub_storage::{FetchSpec, ResourceStore, StorageError};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::assembler::{complete_version_info, resource_summary, versions_info};
use crate::config::QueryConfig;
use crate::error::{Result, ServiceError};
use crate::filters::{
    by_name_exact, by_name_substring, by_resource_id, by_type, compose, limit, order_by_version,
    with_details, with_specific_version,
};
use crate::types::{
    ByTypeNameVersionPayload, ListPayload, QueryPayload, ResourceCollection, Version, Versions,
    VersionsByIdPayload,
};

/// Produced interface consumed by the API transport
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Find resources by name substring, type, or both
    async fn query(&self, payload: &QueryPayload) -> Result<ResourceCollection>;

    /// All resources sorted by rating and name
    async fn list(&self, payload: &ListPayload) -> Result<ResourceCollection>;

    /// Every version of one resource, ascending, plus the latest
    async fn versions_by_id(&self, payload: &VersionsByIdPayload) -> Result<Versions>;

    /// One (type, name, version) with the owning resource embedded
    async fn by_type_name_version(&self, payload: &ByTypeNameVersionPayload) -> Result<Version>;
}

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
    config: QueryConfig,
}

impl ResourceService {
    pub fn new<S: ResourceStore + 'static>(store: S, config: QueryConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    pub fn from_shared(store: Arc<dyn ResourceStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// SQLite-backed service from a loaded configuration
    #[cfg(feature = "sqlite")]
    pub fn open(config: &crate::config::HubConfig) -> std::result::Result<Self, StorageError> {
        let store = hub_storage::SqliteResourceStore::open(&config.database.path)?;
        Ok(Self::new(store, config.query))
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn limit_or_default(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.default_limit)
    }

    async fn resources_for_query(
        &self,
        operation: &'static str,
        spec: FetchSpec,
    ) -> Result<ResourceCollection> {
        let rows = self
            .store
            .fetch_resources(&spec)
            .await
            .map_err(|e| fetch_failed(operation, e))?;

        let collection: ResourceCollection = rows
            .iter()
            .filter_map(|row| {
                let summary = resource_summary(row);
                if summary.is_none() {
                    debug!(
                        operation,
                        resource_id = row.resource.id,
                        "skipping resource without versions"
                    );
                }
                summary
            })
            .collect();

        if collection.is_empty() {
            return Err(ServiceError::NotFound);
        }
        Ok(collection)
    }
}

/// Log a store failure and hide its details from the caller
fn fetch_failed(operation: &'static str, err: StorageError) -> ServiceError {
    error!(operation, kind = %err.kind, error = %err, "failed to fetch resources");
    ServiceError::Internal
}

#[async_trait]
impl ResourceApi for ResourceService {
    async fn query(&self, payload: &QueryPayload) -> Result<ResourceCollection> {
        let spec = compose(vec![
            with_details(),
            by_type(&payload.kind),
            by_name_substring(&payload.name),
            limit(self.limit_or_default(payload.limit)),
        ]);

        self.resources_for_query("query", spec).await
    }

    async fn list(&self, payload: &ListPayload) -> Result<ResourceCollection> {
        let spec = compose(vec![
            with_details(),
            limit(self.limit_or_default(payload.limit)),
        ]);

        self.resources_for_query("list", spec).await
    }

    async fn versions_by_id(&self, payload: &VersionsByIdPayload) -> Result<Versions> {
        let spec = compose(vec![order_by_version(), by_resource_id(payload.id)]);

        let all = self
            .store
            .fetch_versions(&spec)
            .await
            .map_err(|e| fetch_failed("versions_by_id", e))?;

        versions_info(&all).ok_or(ServiceError::NotFound)
    }

    async fn by_type_name_version(&self, payload: &ByTypeNameVersionPayload) -> Result<Version> {
        let spec = compose(vec![
            with_specific_version(&payload.version),
            by_type(&payload.kind),
            by_name_exact(&payload.name),
        ]);

        let mut row = match self.store.first_resource(&spec).await {
            Ok(row) => row,
            Err(e) if e.is_not_found() => return Err(ServiceError::NotFound),
            Err(e) => return Err(fetch_failed("by_type_name_version", e)),
        };

        match row.versions.len() {
            0 => return Err(ServiceError::NotFound),
            1 => {}
            count => {
                // Duplicate version rows: keep the first one loaded
                warn!(
                    resource_id = row.resource.id,
                    version = %payload.version,
                    "expected to find one version but found {}",
                    count
                );
                row.versions.truncate(1);
            }
        }

        complete_version_info(&row).ok_or(ServiceError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hub_storage::{Catalog, InMemoryResourceStore, Resource, ResourceRow, ResourceVersion};
    use pretty_assertions::assert_eq;

    fn service(rows: Vec<ResourceRow>) -> ResourceService {
        ResourceService::new(InMemoryResourceStore::with_rows(rows), QueryConfig::default())
    }

    fn row(id: u32, name: &str, rating: f64, versions: &[&str]) -> ResourceRow {
        let mut row = ResourceRow::new(
            Resource::new(id, name, "task", rating, 1),
            Catalog::new(1, "tekton", "official"),
        );
        row.versions = versions
            .iter()
            .enumerate()
            .map(|(i, v)| {
                ResourceVersion::new(id * 10 + i as u32, id, *v, "https://github.com/x", Utc::now())
            })
            .collect();
        row
    }

    #[tokio::test]
    async fn test_default_limit_applies_when_payload_has_none() {
        let rows: Vec<_> = (1..=5)
            .map(|i| row(i, &format!("r{}", i), 1.0, &["0.1"]))
            .collect();
        let svc = ResourceService::new(
            InMemoryResourceStore::with_rows(rows),
            QueryConfig { default_limit: 3 },
        );

        assert_eq!(svc.list(&ListPayload::default()).await.unwrap().len(), 3);
        assert_eq!(svc.list(&ListPayload::limit(4)).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_resources_without_versions_are_dropped() {
        let svc = service(vec![row(1, "empty", 5.0, &[]), row(2, "full", 1.0, &["0.1"])]);

        let res = svc.list(&ListPayload::default()).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].name, "full");
    }

    #[tokio::test]
    async fn test_only_versionless_resources_is_not_found() {
        let svc = service(vec![row(1, "empty", 5.0, &[])]);

        let err = svc.list(&ListPayload::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound);

        let err = svc
            .by_type_name_version(&ByTypeNameVersionPayload::new("task", "empty", "0.1"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let store = InMemoryResourceStore::with_rows(vec![row(1, "a", 1.0, &["0.1"])]);
        store.fail_with("password authentication failed for user \"hub\"");
        let svc = ResourceService::new(store, QueryConfig::default());

        let err = svc.query(&QueryPayload::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert!(!err.to_string().contains("password"));

        let err = svc.versions_by_id(&VersionsByIdPayload { id: 1 }).await.unwrap_err();
        assert_eq!(err, ServiceError::Internal);

        let err = svc
            .by_type_name_version(&ByTypeNameVersionPayload::new("task", "a", "0.1"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Internal);
    }
}
