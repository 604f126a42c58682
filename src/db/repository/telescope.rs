//! Telescope repository capability.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::TelescopeId;
use crate::models::telescope::Telescope;

/// Read-only access to the telescope inventory.
#[async_trait]
pub trait TelescopeRepository: Send + Sync {
    /// Whether a telescope with this id exists.
    async fn telescope_exists(&self, id: TelescopeId) -> RepositoryResult<bool>;

    /// Fetch a telescope by id, if present.
    async fn find_telescope(&self, id: TelescopeId) -> RepositoryResult<Option<Telescope>>;
}
