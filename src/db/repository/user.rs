//! User and role repository capabilities.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::UserId;
use crate::models::user::{Role, User, UserRole};

/// Read-only access to registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a user with this id exists.
    async fn user_exists(&self, id: UserId) -> RepositoryResult<bool>;

    /// Fetch a user by id, if present.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

/// Access to role assignments.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// The approved roles a user holds. Pending (unapproved) roles are
    /// never returned; they grant nothing.
    async fn approved_roles_for_user(&self, id: UserId) -> RepositoryResult<Vec<Role>>;

    /// All role records for a user, approved or not.
    async fn roles_for_user(&self, id: UserId) -> RepositoryResult<Vec<UserRole>>;
}
