//! Command factory for appointment operations.
//!
//! Maps an operation plus its typed request to a constructed,
//! ready-to-execute command with the right repository collaborators
//! wired in. Construction is pure: the factory never authorizes and
//! never executes.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    AppointmentRequest, ApproveDeny, Cancel, Create, Decision, ListBetweenDates, MakePublic,
    Request, Retrieve, Search, Update, UserFutureList, UserList,
};
use crate::api::{AppointmentId, PageRequest, UserId};
use crate::db::models::SearchCriterion;
use crate::db::repository::{
    AllottedTimeCapRepository, AppointmentRepository, FullRepository, TelescopeRepository,
    UserRepository,
};

/// Constructs appointment commands bound to repository collaborators.
///
/// Collaborators are supplied once at construction; a missing
/// collaborator is a configuration error at startup, never a per-request
/// condition.
#[derive(Clone)]
pub struct AppointmentFactory {
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
    telescope_repo: Arc<dyn TelescopeRepository>,
    cap_repo: Arc<dyn AllottedTimeCapRepository>,
}

impl AppointmentFactory {
    pub fn new(
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
        telescope_repo: Arc<dyn TelescopeRepository>,
        cap_repo: Arc<dyn AllottedTimeCapRepository>,
    ) -> Self {
        Self {
            appointment_repo,
            user_repo,
            telescope_repo,
            cap_repo,
        }
    }

    /// Wire every collaborator from one full repository.
    pub fn from_repository<R: FullRepository + 'static>(repo: Arc<R>) -> Self {
        Self::new(repo.clone(), repo.clone(), repo.clone(), repo)
    }

    /// Create command: validate and schedule a new appointment.
    pub fn create(&self, request: AppointmentRequest) -> Create {
        Create::new(
            request,
            self.appointment_repo.clone(),
            self.user_repo.clone(),
            self.telescope_repo.clone(),
            self.cap_repo.clone(),
        )
    }

    /// Request command: file an appointment for admin approval.
    pub fn request(&self, request: AppointmentRequest) -> Request {
        Request::new(
            request,
            self.appointment_repo.clone(),
            self.user_repo.clone(),
            self.telescope_repo.clone(),
            self.cap_repo.clone(),
        )
    }

    /// Update command for an existing appointment.
    pub fn update(&self, appointment_id: AppointmentId, request: AppointmentRequest) -> Update {
        Update::new(
            appointment_id,
            request,
            self.appointment_repo.clone(),
            self.user_repo.clone(),
            self.telescope_repo.clone(),
            self.cap_repo.clone(),
        )
    }

    /// Cancel command.
    pub fn cancel(&self, appointment_id: AppointmentId) -> Cancel {
        Cancel::new(appointment_id, self.appointment_repo.clone())
    }

    /// Approve/deny command for a requested appointment.
    pub fn approve_deny(&self, appointment_id: AppointmentId, decision: Decision) -> ApproveDeny {
        ApproveDeny::new(appointment_id, decision, self.appointment_repo.clone())
    }

    /// Make-public command.
    pub fn make_public(&self, appointment_id: AppointmentId) -> MakePublic {
        MakePublic::new(appointment_id, self.appointment_repo.clone())
    }

    /// Retrieve command.
    pub fn retrieve(&self, appointment_id: AppointmentId) -> Retrieve {
        Retrieve::new(appointment_id, self.appointment_repo.clone())
    }

    /// List command for all of a user's appointments.
    pub fn user_list(&self, user_id: UserId, page: PageRequest) -> UserList {
        UserList::new(
            user_id,
            page,
            self.appointment_repo.clone(),
            self.user_repo.clone(),
        )
    }

    /// List command for a user's upcoming appointments.
    pub fn user_future_list(&self, user_id: UserId, page: PageRequest) -> UserFutureList {
        UserFutureList::new(
            user_id,
            page,
            self.appointment_repo.clone(),
            self.user_repo.clone(),
        )
    }

    /// Calendar-window list command.
    pub fn list_between_dates(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ListBetweenDates {
        ListBetweenDates::new(start, end, self.appointment_repo.clone())
    }

    /// Search command.
    pub fn search(&self, criteria: Vec<SearchCriterion>, page: PageRequest) -> Search {
        Search::new(criteria, page, self.appointment_repo.clone())
    }
}
