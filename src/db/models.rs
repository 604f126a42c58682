//! Query-side model types shared between the repository traits and the
//! command layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{TelescopeId, UserId};
use crate::models::appointment::{AppointmentKind, AppointmentStatus};

/// One typed filter in an appointment search.
///
/// A search is the conjunction of its criteria. The closed enum replaces
/// stringly-typed (field, operator, value) triples; each variant knows the
/// field it addresses and the type of its operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCriterion {
    /// Appointments owned by this user.
    User(UserId),
    /// Appointments on this telescope.
    Telescope(TelescopeId),
    /// Appointments currently in this lifecycle state.
    Status(AppointmentStatus),
    /// Appointments of this observation kind.
    Kind(AppointmentKind),
    /// Public or private appointments only.
    IsPublic(bool),
    /// Appointments starting at or after this instant.
    StartsAtOrAfter(DateTime<Utc>),
    /// Appointments ending at or before this instant.
    EndsAtOrBefore(DateTime<Utc>),
}

impl SearchCriterion {
    /// Whether `appointment` satisfies this criterion.
    pub fn matches(&self, appointment: &crate::models::Appointment) -> bool {
        match self {
            Self::User(id) => appointment.user_id == *id,
            Self::Telescope(id) => appointment.telescope_id == *id,
            Self::Status(status) => appointment.status == *status,
            Self::Kind(kind) => appointment.kind() == *kind,
            Self::IsPublic(public) => appointment.is_public == *public,
            Self::StartsAtOrAfter(t) => appointment.start_time >= *t,
            Self::EndsAtOrBefore(t) => appointment.end_time <= *t,
        }
    }
}
