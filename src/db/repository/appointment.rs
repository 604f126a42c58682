//! Appointment repository capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{AppointmentId, Page, PageRequest, TelescopeId, UserId};
use crate::db::models::SearchCriterion;
use crate::models::appointment::{Appointment, AppointmentStatus, AppointmentTarget};

/// Fields of a new appointment, minus the id the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub user_id: UserId,
    pub telescope_id: TelescopeId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub status: AppointmentStatus,
    pub target: AppointmentTarget,
}

/// Persistence for appointments and their owned coordinates.
///
/// # Conflict guard
/// Implementations must enforce an exclusion constraint over
/// (telescope, active status, `[start_time, end_time)`): a write that
/// would give one telescope two overlapping non-canceled/non-denied
/// appointments fails with `RepositoryError::ConstraintViolation`.
/// The application-level conflict check is only a fast path; this
/// constraint is what actually closes the check-then-act race between
/// concurrent writers.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Whether an appointment with this id exists.
    async fn appointment_exists(&self, id: AppointmentId) -> RepositoryResult<bool>;

    /// Fetch an appointment by id, if present.
    async fn find_appointment(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>>;

    /// Persist a new appointment together with its coordinates as one
    /// atomic write, returning the assigned id. No partially written
    /// appointment is ever observable to a concurrent reader.
    async fn save(&self, appointment: NewAppointment) -> RepositoryResult<AppointmentId>;

    /// Replace an existing appointment's row. Subject to the same
    /// exclusion constraint as `save`.
    async fn update(&self, appointment: Appointment) -> RepositoryResult<()>;

    /// Appointments on `telescope_id` whose window intersects the
    /// half-open `[start, end)` and whose status still blocks telescope
    /// time. `exclude` removes one appointment from consideration so an
    /// update does not conflict with itself.
    async fn find_conflicts(
        &self,
        telescope_id: TelescopeId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>>;

    /// A user's appointments, ordered by start time ascending.
    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>>;

    /// A user's appointments starting after `after`, ordered by start
    /// time ascending.
    async fn find_future_by_user(
        &self,
        user_id: UserId,
        after: DateTime<Utc>,
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>>;

    /// Appointments whose window intersects `[start, end)`, any user,
    /// ordered by start time ascending.
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Appointment>>;

    /// Total seconds of a user's appointments that still count against
    /// their quota (non-canceled/non-denied).
    async fn total_scheduled_seconds(&self, user_id: UserId) -> RepositoryResult<i64>;

    /// Appointments matching every criterion, ordered by start time
    /// ascending and paginated.
    async fn search(
        &self,
        criteria: &[SearchCriterion],
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>>;
}
