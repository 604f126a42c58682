//! Allotted-time-cap repository capability.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::UserId;
use crate::models::time_cap::AllottedTimeCap;

/// Access to per-user observation time quotas.
#[async_trait]
pub trait AllottedTimeCapRepository: Send + Sync {
    /// The cap configured for a user, if any. Absent caps mean unlimited.
    async fn cap_for_user(&self, id: UserId) -> RepositoryResult<Option<AllottedTimeCap>>;

    /// Install or replace a user's cap. Admin-only at the call site; the
    /// repository does not authorize.
    async fn set_cap(&self, cap: AllottedTimeCap) -> RepositoryResult<()>;
}
