//! Appointment creation commands.
//!
//! [`Create`] schedules an appointment directly; [`Request`] files it for
//! admin approval instead (status `Requested`). Both validate the same
//! way; the only difference is the status the new appointment lands in.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::AppointmentRequest;
use crate::api::AppointmentId;
use crate::contracts::{validation, Command, CommandResult, ErrorSet};
use crate::db::repository::{
    AllottedTimeCapRepository, AppointmentRepository, NewAppointment, TelescopeRepository,
    UserRepository,
};
use crate::models::appointment::AppointmentStatus;

/// Shared validation for create/request: reference existence first
/// (short-circuits everything else), then window + target bounds
/// accumulated together, then conflict and quota checks.
async fn validate_request(
    request: &AppointmentRequest,
    appointment_repo: &dyn AppointmentRepository,
    user_repo: &dyn UserRepository,
    telescope_repo: &dyn TelescopeRepository,
    cap_repo: &dyn AllottedTimeCapRepository,
) -> CommandResult<()> {
    let references = validation::validate_references(
        user_repo,
        telescope_repo,
        request.user_id,
        request.telescope_id,
    )
    .await?;
    references.into_result()?;

    let mut errors = ErrorSet::new();
    errors.merge(validation::validate_time_window(
        request.start_time,
        request.end_time,
        Utc::now(),
    ));
    errors.merge(request.target.validate());
    errors.into_result()?;

    let mut errors = ErrorSet::new();
    errors.merge(
        validation::validate_no_conflicts(
            appointment_repo,
            request.telescope_id,
            request.start_time,
            request.end_time,
            None,
        )
        .await?,
    );
    errors.merge(
        validation::validate_allotted_time(
            appointment_repo,
            cap_repo,
            request.user_id,
            request.proposed_seconds(),
            0,
        )
        .await?,
    );
    errors.into_result()
}

async fn persist(
    request: &AppointmentRequest,
    status: AppointmentStatus,
    appointment_repo: &dyn AppointmentRepository,
) -> CommandResult<AppointmentId> {
    let id = appointment_repo
        .save(NewAppointment {
            user_id: request.user_id,
            telescope_id: request.telescope_id,
            start_time: request.start_time,
            end_time: request.end_time,
            is_public: request.is_public,
            status,
            target: request.target.to_target(),
        })
        .await?;
    debug!(
        "created appointment {} ({}) for user {}",
        id, status, request.user_id
    );
    Ok(id)
}

/// Creates a scheduled appointment with its coordinates in one atomic
/// write, returning the new id.
pub struct Create {
    request: AppointmentRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
    telescope_repo: Arc<dyn TelescopeRepository>,
    cap_repo: Arc<dyn AllottedTimeCapRepository>,
}

impl Create {
    pub fn new(
        request: AppointmentRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
        telescope_repo: Arc<dyn TelescopeRepository>,
        cap_repo: Arc<dyn AllottedTimeCapRepository>,
    ) -> Self {
        Self {
            request,
            appointment_repo,
            user_repo,
            telescope_repo,
            cap_repo,
        }
    }
}

#[async_trait]
impl Command for Create {
    type Output = AppointmentId;

    async fn execute(&self) -> CommandResult<AppointmentId> {
        validate_request(
            &self.request,
            self.appointment_repo.as_ref(),
            self.user_repo.as_ref(),
            self.telescope_repo.as_ref(),
            self.cap_repo.as_ref(),
        )
        .await?;

        persist(
            &self.request,
            AppointmentStatus::Scheduled,
            self.appointment_repo.as_ref(),
        )
        .await
    }
}

/// Files an appointment request awaiting admin approval.
///
/// Identical validation to [`Create`]; the appointment lands in
/// `Requested` and holds its telescope window while the request is
/// pending. Denial releases the window, approval confirms it.
pub struct Request {
    request: AppointmentRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
    telescope_repo: Arc<dyn TelescopeRepository>,
    cap_repo: Arc<dyn AllottedTimeCapRepository>,
}

impl Request {
    pub fn new(
        request: AppointmentRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
        telescope_repo: Arc<dyn TelescopeRepository>,
        cap_repo: Arc<dyn AllottedTimeCapRepository>,
    ) -> Self {
        Self {
            request,
            appointment_repo,
            user_repo,
            telescope_repo,
            cap_repo,
        }
    }
}

#[async_trait]
impl Command for Request {
    type Output = AppointmentId;

    async fn execute(&self) -> CommandResult<AppointmentId> {
        validate_request(
            &self.request,
            self.appointment_repo.as_ref(),
            self.user_repo.as_ref(),
            self.telescope_repo.as_ref(),
            self.cap_repo.as_ref(),
        )
        .await?;

        persist(
            &self.request,
            AppointmentStatus::Requested,
            self.appointment_repo.as_ref(),
        )
        .await
    }
}
