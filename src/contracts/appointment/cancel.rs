//! Appointment cancel command.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::api::AppointmentId;
use crate::contracts::{Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::AppointmentRepository;
use crate::models::appointment::AppointmentStatus;

/// Transitions a non-terminal appointment to `Canceled`, releasing its
/// telescope window.
///
/// Canceling an appointment that is already canceled (or otherwise
/// terminal) is an error, not a silent second success — repeated cancels
/// must be visible to the audit trail.
pub struct Cancel {
    appointment_id: AppointmentId,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl Cancel {
    pub fn new(appointment_id: AppointmentId, appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            appointment_id,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for Cancel {
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

        if !appointment.status.can_transition_to(AppointmentStatus::Canceled) {
            return Err(ErrorSet::of(
                ErrorTag::Status,
                format!(
                    "Appointment #{} is {} and cannot be canceled",
                    appointment.id, appointment.status
                ),
            ));
        }

        appointment.status = AppointmentStatus::Canceled;
        self.appointment_repo.update(appointment).await?;
        debug!("canceled appointment {}", self.appointment_id);
        Ok(self.appointment_id)
    }
}
