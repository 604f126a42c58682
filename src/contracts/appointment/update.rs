//! Appointment update command.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::AppointmentRequest;
use crate::api::AppointmentId;
use crate::contracts::{validation, Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::{
    AllottedTimeCapRepository, AppointmentRepository, TelescopeRepository, UserRepository,
};

/// Re-validates and replaces an appointment's window, telescope, target
/// and visibility.
///
/// The appointment's own row is excluded from conflict detection, its
/// current duration is excluded from the quota sum, and terminal-status
/// appointments reject any update. Ownership does not change; a request
/// naming a different user is rejected, and the quota is always charged
/// to the recorded owner.
pub struct Update {
    appointment_id: AppointmentId,
    request: AppointmentRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
    telescope_repo: Arc<dyn TelescopeRepository>,
    cap_repo: Arc<dyn AllottedTimeCapRepository>,
}

impl Update {
    pub fn new(
        appointment_id: AppointmentId,
        request: AppointmentRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
        telescope_repo: Arc<dyn TelescopeRepository>,
        cap_repo: Arc<dyn AllottedTimeCapRepository>,
    ) -> Self {
        Self {
            appointment_id,
            request,
            appointment_repo,
            user_repo,
            telescope_repo,
            cap_repo,
        }
    }
}

#[async_trait]
impl Command for Update {
    type Output = AppointmentId;

    async fn execute(&self) -> CommandResult<AppointmentId> {
        let Some(mut appointment) = self
            .appointment_repo
            .find_appointment(self.appointment_id)
            .await?
        else {
            return Err(ErrorSet::of(
                ErrorTag::AppointmentId,
                format!("Appointment #{} could not be found", self.appointment_id),
            ));
        };

        if appointment.status.is_terminal() {
            return Err(ErrorSet::of(
                ErrorTag::Status,
                format!(
                    "Appointment #{} is {} and can no longer be updated",
                    appointment.id, appointment.status
                ),
            ));
        }

        if self.request.user_id != appointment.user_id {
            return Err(ErrorSet::of(
                ErrorTag::UserId,
                format!(
                    "Appointment #{} belongs to user #{}; ownership cannot be reassigned",
                    appointment.id, appointment.user_id
                ),
            ));
        }

        let references = validation::validate_references(
            self.user_repo.as_ref(),
            self.telescope_repo.as_ref(),
            appointment.user_id,
            self.request.telescope_id,
        )
        .await?;
        references.into_result()?;

        let mut errors = ErrorSet::new();
        errors.merge(validation::validate_time_window(
            self.request.start_time,
            self.request.end_time,
            Utc::now(),
        ));
        errors.merge(self.request.target.validate());
        errors.into_result()?;

        let mut errors = ErrorSet::new();
        errors.merge(
            validation::validate_no_conflicts(
                self.appointment_repo.as_ref(),
                self.request.telescope_id,
                self.request.start_time,
                self.request.end_time,
                Some(self.appointment_id),
            )
            .await?,
        );
        errors.merge(
            validation::validate_allotted_time(
                self.appointment_repo.as_ref(),
                self.cap_repo.as_ref(),
                appointment.user_id,
                self.request.proposed_seconds(),
                appointment.duration().num_seconds(),
            )
            .await?,
        );
        errors.into_result()?;

        appointment.telescope_id = self.request.telescope_id;
        appointment.start_time = self.request.start_time;
        appointment.end_time = self.request.end_time;
        appointment.is_public = self.request.is_public;
        appointment.target = self.request.target.to_target();

        self.appointment_repo.update(appointment).await?;
        debug!("updated appointment {}", self.appointment_id);
        Ok(self.appointment_id)
    }
}
