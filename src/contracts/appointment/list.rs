//! List query commands.
//!
//! All lists are ordered by start time ascending.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{AppointmentInfo, Page, PageRequest, UserId};
use crate::contracts::{Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::repository::{AppointmentRepository, UserRepository};

/// All appointments owned by a user, paginated.
pub struct UserList {
    user_id: UserId,
    page: PageRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl UserList {
    pub fn new(
        user_id: UserId,
        page: PageRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            user_id,
            page,
            appointment_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl Command for UserList {
    type Output = Page<AppointmentInfo>;

    async fn execute(&self) -> CommandResult<Page<AppointmentInfo>> {
        if !self.user_repo.user_exists(self.user_id).await? {
            return Err(ErrorSet::of(
                ErrorTag::UserId,
                format!("User #{} could not be found", self.user_id),
            ));
        }

        let page = self
            .appointment_repo
            .find_by_user(self.user_id, self.page)
            .await?;
        Ok(page.map(|a| a.to_info()))
    }
}

/// A user's upcoming appointments (starting after now), paginated.
pub struct UserFutureList {
    user_id: UserId,
    page: PageRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl UserFutureList {
    pub fn new(
        user_id: UserId,
        page: PageRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            user_id,
            page,
            appointment_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl Command for UserFutureList {
    type Output = Page<AppointmentInfo>;

    async fn execute(&self) -> CommandResult<Page<AppointmentInfo>> {
        if !self.user_repo.user_exists(self.user_id).await? {
            return Err(ErrorSet::of(
                ErrorTag::UserId,
                format!("User #{} could not be found", self.user_id),
            ));
        }

        let page = self
            .appointment_repo
            .find_future_by_user(self.user_id, Utc::now(), self.page)
            .await?;
        Ok(page.map(|a| a.to_info()))
    }
}

/// Every appointment intersecting a calendar window, any user.
pub struct ListBetweenDates {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl ListBetweenDates {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        appointment_repo: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            start,
            end,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for ListBetweenDates {
    type Output = Vec<AppointmentInfo>;

    async fn execute(&self) -> CommandResult<Vec<AppointmentInfo>> {
        if self.end <= self.start {
            return Err(ErrorSet::of(
                ErrorTag::EndTime,
                "End of the window must be after its start",
            ));
        }

        let appointments = self.appointment_repo.find_between(self.start, self.end).await?;
        Ok(appointments.iter().map(|a| a.to_info()).collect())
    }
}
