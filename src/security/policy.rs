//! Declarative role policy.
//!
//! The required-role set for a gated operation depends on whether the
//! requester owns the targeted resource — RBAC conditioned on a runtime
//! ownership predicate. Keeping the table in one pure function makes the
//! policy testable independently of the gating mechanism.

use crate::models::user::Role;
use crate::security::session::UserSession;

/// Gated operations the policy covers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Request,
    Update,
    Cancel,
    ApproveDeny,
    MakePublic,
    Retrieve,
    ListForUser,
    ListBetweenDates,
    Search,
}

/// How a role list must be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// The requester must hold at least one of these roles.
    Any(Vec<Role>),
    /// The requester must hold all of these roles.
    All(Vec<Role>),
}

impl RoleRequirement {
    pub fn satisfied_by(&self, session: &UserSession) -> bool {
        match self {
            Self::Any(roles) => roles.iter().any(|r| session.has_role(*r)),
            Self::All(roles) => roles.iter().all(|r| session.has_role(*r)),
        }
    }

    /// The roles to report when the requirement is not met.
    ///
    /// For `Any` the whole alternative list is reported (holding any one
    /// would have sufficed); for `All`, only the roles actually absent.
    pub fn missing_for(&self, session: &UserSession) -> Vec<Role> {
        match self {
            Self::Any(roles) => roles.clone(),
            Self::All(roles) => roles
                .iter()
                .copied()
                .filter(|r| !session.has_role(*r))
                .collect(),
        }
    }
}

/// The role set an operation requires, given resource ownership.
///
/// Self-service: any authenticated member may act on their own
/// appointments, except publishing a private appointment, which takes
/// community standing. Acting on another's resource always takes an
/// elevated role; approval rulings are admin-only regardless of
/// ownership.
pub fn required_roles(is_owner: bool, operation: Operation) -> RoleRequirement {
    use Operation::*;

    match operation {
        ApproveDeny => RoleRequirement::Any(vec![Role::Admin]),
        ListBetweenDates | Search => RoleRequirement::All(vec![Role::User]),
        MakePublic if is_owner => {
            RoleRequirement::Any(vec![Role::Researcher, Role::Admin, Role::Alumni])
        }
        Create | Request | Update | Cancel | Retrieve | ListForUser | MakePublic => {
            if is_owner {
                RoleRequirement::All(vec![Role::User])
            } else {
                RoleRequirement::Any(vec![Role::Admin, Role::Alumni])
            }
        }
    }
}
