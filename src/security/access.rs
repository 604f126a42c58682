//! Structured denial reasons.

use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Why a gated call did not release its command.
///
/// Request-scoped and never persisted. The two causes are mutually
/// exclusive by construction: a denial is either about roles or about a
/// resource that does not exist, never both. Callers render them with
/// different status semantics (forbidden vs. not-found).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessReport {
    /// The requester lacks the roles the operation requires. The list
    /// names the roles that would have satisfied the check.
    MissingRoles(Vec<Role>),
    /// The operation targeted a resource id that does not resolve.
    InvalidResourceId { resource: &'static str, id: i64 },
}

impl AccessReport {
    /// The standard report for an unauthenticated caller.
    pub fn unauthenticated() -> Self {
        Self::MissingRoles(vec![Role::User])
    }

    pub fn invalid_appointment(id: crate::api::AppointmentId) -> Self {
        Self::InvalidResourceId {
            resource: "appointment",
            id: id.value(),
        }
    }
}
