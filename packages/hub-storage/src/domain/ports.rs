//! Storage Port (Trait Interface)
//!
//! Port/Adapter pattern for backend flexibility:
//! - Deployment: SQLite (zero-config)
//! - Testing: InMemory (fast unit tests)

use async_trait::async_trait;

use super::fetch::FetchSpec;
use super::models::{ResourceRow, ResourceVersion};
use crate::Result;

/// Resource Store Port (Primary Interface)
///
/// Read-only. Every method evaluates one `FetchSpec` in a single round
/// trip; cancellation is dropping the returned future.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch every resource matching the spec, related rows resolved
    ///
    /// An empty result is `Ok(vec![])`, not an error.
    async fn fetch_resources(&self, spec: &FetchSpec) -> Result<Vec<ResourceRow>>;

    /// Fetch the first resource matching the spec
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::RecordNotFound` if nothing matches
    async fn first_resource(&self, spec: &FetchSpec) -> Result<ResourceRow>;

    /// Fetch version rows matching the spec (no preloading applies)
    async fn fetch_versions(&self, spec: &FetchSpec) -> Result<Vec<ResourceVersion>>;
}
