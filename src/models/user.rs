//! Users and their role assignments.

use serde::{Deserialize, Serialize};

use crate::api::UserId;

/// Privilege level a user can hold.
///
/// `User` is the base role every authenticated account holds; the others
/// grade community standing. A role only counts toward authorization once
/// it has been approved (see [`UserRole::approved`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Guest,
    Student,
    Member,
    Researcher,
    Alumni,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "USER",
            Self::Guest => "GUEST",
            Self::Student => "STUDENT",
            Self::Member => "MEMBER",
            Self::Researcher => "RESEARCHER",
            Self::Alumni => "ALUMNI",
            Self::Admin => "ADMIN",
        };
        f.write_str(s)
    }
}

/// A registered account. Referenced by appointments and roles, never owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// One role held by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: UserId,
    pub role: Role,
    /// Unapproved roles are pending admin review and grant nothing.
    pub approved: bool,
}

impl UserRole {
    pub fn approved(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            approved: true,
        }
    }

    pub fn pending(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            approved: false,
        }
    }
}
