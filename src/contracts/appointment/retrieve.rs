//! Single-appointment lookup command.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{AppointmentId, AppointmentInfo};
use crate::contracts::{Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::AppointmentRepository;

/// Fetches one appointment by id as its read-side representation.
pub struct Retrieve {
    appointment_id: AppointmentId,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl Retrieve {
    pub fn new(appointment_id: AppointmentId, appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            appointment_id,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for Retrieve {
    type Output = AppointmentInfo;

    async fn execute(&self) -> CommandResult<AppointmentInfo> {
        match self
            .appointment_repo
            .find_appointment(self.appointment_id)
            .await?
        {
            Some(appointment) => Ok(appointment.to_info()),
            None => Err(ErrorSet::of(
                ErrorTag::AppointmentId,
                format!("Appointment #{} could not be found", self.appointment_id),
            )),
        }
    }
}
