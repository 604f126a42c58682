//! Approval command for requested appointments.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::AppointmentId;
use crate::contracts::{validation, Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::AppointmentRepository;
use crate::models::appointment::AppointmentStatus;

/// Admin ruling on a requested appointment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Deny,
}

/// Transitions `Requested -> Scheduled` (approve) or
/// `Requested -> Denied` (deny).
///
/// Any other source state is rejected; `Denied` is terminal, so a denied
/// request cannot be re-approved. A pending request already holds its
/// telescope window, so approval normally finds it free; the conflict
/// re-check guards stores populated outside the command layer.
pub struct ApproveDeny {
    appointment_id: AppointmentId,
    decision: Decision,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl ApproveDeny {
    pub fn new(
        appointment_id: AppointmentId,
        decision: Decision,
        appointment_repo: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            appointment_id,
            decision,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for ApproveDeny {
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

        if appointment.status != AppointmentStatus::Requested {
            return Err(ErrorSet::of(
                ErrorTag::Status,
                format!(
                    "Appointment #{} is {}; only requested appointments can be approved or denied",
                    appointment.id, appointment.status
                ),
            ));
        }

        let next = match self.decision {
            Decision::Approve => {
                let conflicts = validation::validate_no_conflicts(
                    self.appointment_repo.as_ref(),
                    appointment.telescope_id,
                    appointment.start_time,
                    appointment.end_time,
                    Some(appointment.id),
                )
                .await?;
                conflicts.into_result()?;
                AppointmentStatus::Scheduled
            }
            Decision::Deny => AppointmentStatus::Denied,
        };

        appointment.status = next;
        self.appointment_repo.update(appointment).await?;
        debug!(
            "appointment {} ruled {:?}",
            self.appointment_id, self.decision
        );
        Ok(self.appointment_id)
    }
}
