//! Visibility-flip command.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::api::AppointmentId;
use crate::contracts::{Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::AppointmentRepository;

/// Makes a private appointment publicly visible.
///
/// Flipping an appointment that is already public is reported as an
/// error so repeated requests stay visible to callers.
pub struct MakePublic {
    appointment_id: AppointmentId,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl MakePublic {
    pub fn new(appointment_id: AppointmentId, appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            appointment_id,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for MakePublic {
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

        if appointment.is_public {
            return Err(ErrorSet::of(
                ErrorTag::Public,
                format!("Appointment #{} is already public", appointment.id),
            ));
        }

        appointment.is_public = true;
        self.appointment_repo.update(appointment).await?;
        debug!("appointment {} made public", self.appointment_id);
        Ok(self.appointment_id)
    }
}
