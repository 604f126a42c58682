//! Appointment search command.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{AppointmentInfo, Page, PageRequest};
use crate::contracts::{Command, CommandResult, ErrorSet, ErrorTag};
use crate::db::models::SearchCriterion;
use crate::db::repository::AppointmentRepository;

/// Paginated search over appointments.
///
/// Criteria are conjunctive: a match satisfies every criterion. An empty
/// criteria list is rejected rather than interpreted as "match all".
pub struct Search {
    criteria: Vec<SearchCriterion>,
    page: PageRequest,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl Search {
    pub fn new(
        criteria: Vec<SearchCriterion>,
        page: PageRequest,
        appointment_repo: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            criteria,
            page,
            appointment_repo,
        }
    }
}

#[async_trait]
impl Command for Search {
    type Output = Page<AppointmentInfo>;

    async fn execute(&self) -> CommandResult<Page<AppointmentInfo>> {
        if self.criteria.is_empty() {
            return Err(ErrorSet::of(
                ErrorTag::Search,
                "A search requires at least one criterion",
            ));
        }

        let page = self
            .appointment_repo
            .search(&self.criteria, self.page)
            .await?;
        Ok(page.map(|a| a.to_info()))
    }
}
