//! Request-scoped requester identity.

use crate::api::UserId;
use crate::db::repository::{RepositoryResult, RoleRepository};
use crate::models::user::Role;

/// The authenticated requester for the duration of one request.
///
/// Carries the resolved user id and approved role set; gated operations
/// take it as an explicit parameter instead of reading ambient state.
/// Every authenticated session implicitly holds [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    user_id: UserId,
    roles: Vec<Role>,
}

impl UserSession {
    /// Build a session from an id and its approved roles. `Role::User`
    /// is added when absent.
    pub fn new(user_id: UserId, mut roles: Vec<Role>) -> Self {
        if !roles.contains(&Role::User) {
            roles.push(Role::User);
        }
        Self { user_id, roles }
    }

    /// Resolve a session from the role repository. Unapproved roles are
    /// excluded at the repository level.
    pub async fn load(user_id: UserId, role_repo: &dyn RoleRepository) -> RepositoryResult<Self> {
        let roles = role_repo.approved_roles_for_user(user_id).await?;
        Ok(Self::new(user_id, roles))
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether this session owns the given resource owner id.
    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}
