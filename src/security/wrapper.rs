//! Authorization gate in front of the appointment factory.
//!
//! Every gated method runs the same pipeline: resolve the targeted
//! resource (unknown ids are reported as such even to anonymous
//! callers), require an authenticated session, check the role policy
//! against ownership, and only then build and execute the command.
//! Denial and execution failure stay on separate channels: the outer
//! `Result` carries the access verdict, the inner one the command
//! outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::{AppointmentId, AppointmentInfo, Page, PageRequest, UserId};
use crate::contracts::appointment::{AppointmentFactory, AppointmentRequest, Decision};
use crate::contracts::{Command, CommandResult, ErrorSet};
use crate::db::models::SearchCriterion;
use crate::db::repository::AppointmentRepository;
use crate::security::access::AccessReport;
use crate::security::policy::{required_roles, Operation};
use crate::security::session::UserSession;

/// Outcome of a gated call: access verdict outside, command result inside.
pub type Gated<T> = Result<CommandResult<T>, AccessReport>;

/// Early exit from the resource-resolution step.
enum Halt {
    Denied(AccessReport),
    Failed(ErrorSet),
}

impl Halt {
    fn into_gated<T>(self) -> Gated<T> {
        match self {
            Self::Denied(report) => Err(report),
            Self::Failed(errors) => Ok(Err(errors)),
        }
    }
}

/// Role-gated front door for appointment operations.
pub struct AppointmentWrapper {
    factory: AppointmentFactory,
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl AppointmentWrapper {
    pub fn new(factory: AppointmentFactory, appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self {
            factory,
            appointment_repo,
        }
    }

    /// Resolve the owner of a targeted appointment.
    ///
    /// Runs before any session check so that a nonexistent target is
    /// reported as an invalid resource rather than masked behind a role
    /// denial. Storage faults surface on the command-result channel;
    /// they are not access verdicts.
    async fn owner_of(&self, appointment_id: AppointmentId) -> Result<UserId, Halt> {
        match self.appointment_repo.find_appointment(appointment_id).await {
            Ok(Some(appointment)) => Ok(appointment.user_id),
            Ok(None) => Err(Halt::Denied(AccessReport::invalid_appointment(
                appointment_id,
            ))),
            Err(err) => Err(Halt::Failed(ErrorSet::from(err))),
        }
    }

    /// Check the role policy for `operation` against the session.
    ///
    /// `owner` is the id the requester would have to match to count as
    /// owning the resource; `None` for operations with no resource
    /// ownership notion.
    fn authorize(
        &self,
        session: Option<&UserSession>,
        owner: Option<UserId>,
        operation: Operation,
    ) -> Result<(), AccessReport> {
        let session = session.ok_or_else(AccessReport::unauthenticated)?;
        let is_owner = owner.is_some_and(|o| session.owns(o));
        let requirement = required_roles(is_owner, operation);
        if requirement.satisfied_by(session) {
            Ok(())
        } else {
            let missing = requirement.missing_for(session);
            log::debug!(
                "access denied: user {} lacks {:?} for {:?}",
                session.user_id(),
                missing,
                operation
            );
            Err(AccessReport::MissingRoles(missing))
        }
    }

    pub async fn create(
        &self,
        session: Option<&UserSession>,
        request: AppointmentRequest,
    ) -> Gated<AppointmentId> {
        self.authorize(session, Some(request.user_id), Operation::Create)?;
        Ok(self.factory.create(request).execute().await)
    }

    pub async fn request(
        &self,
        session: Option<&UserSession>,
        request: AppointmentRequest,
    ) -> Gated<AppointmentId> {
        self.authorize(session, Some(request.user_id), Operation::Request)?;
        Ok(self.factory.request(request).execute().await)
    }

    pub async fn update(
        &self,
        session: Option<&UserSession>,
        appointment_id: AppointmentId,
        request: AppointmentRequest,
    ) -> Gated<AppointmentId> {
        let owner = match self.owner_of(appointment_id).await {
            Ok(owner) => owner,
            Err(halt) => return halt.into_gated(),
        };
        self.authorize(session, Some(owner), Operation::Update)?;
        Ok(self.factory.update(appointment_id, request).execute().await)
    }

    pub async fn cancel(
        &self,
        session: Option<&UserSession>,
        appointment_id: AppointmentId,
    ) -> Gated<AppointmentId> {
        let owner = match self.owner_of(appointment_id).await {
            Ok(owner) => owner,
            Err(halt) => return halt.into_gated(),
        };
        self.authorize(session, Some(owner), Operation::Cancel)?;
        Ok(self.factory.cancel(appointment_id).execute().await)
    }

    pub async fn approve_deny(
        &self,
        session: Option<&UserSession>,
        appointment_id: AppointmentId,
        decision: Decision,
    ) -> Gated<AppointmentId> {
        let owner = match self.owner_of(appointment_id).await {
            Ok(owner) => owner,
            Err(halt) => return halt.into_gated(),
        };
        self.authorize(session, Some(owner), Operation::ApproveDeny)?;
        Ok(self
            .factory
            .approve_deny(appointment_id, decision)
            .execute()
            .await)
    }

    pub async fn make_public(
        &self,
        session: Option<&UserSession>,
        appointment_id: AppointmentId,
    ) -> Gated<AppointmentId> {
        let owner = match self.owner_of(appointment_id).await {
            Ok(owner) => owner,
            Err(halt) => return halt.into_gated(),
        };
        self.authorize(session, Some(owner), Operation::MakePublic)?;
        Ok(self.factory.make_public(appointment_id).execute().await)
    }

    pub async fn retrieve(
        &self,
        session: Option<&UserSession>,
        appointment_id: AppointmentId,
    ) -> Gated<AppointmentInfo> {
        let owner = match self.owner_of(appointment_id).await {
            Ok(owner) => owner,
            Err(halt) => return halt.into_gated(),
        };
        self.authorize(session, Some(owner), Operation::Retrieve)?;
        Ok(self.factory.retrieve(appointment_id).execute().await)
    }

    pub async fn user_list(
        &self,
        session: Option<&UserSession>,
        user_id: UserId,
        page: PageRequest,
    ) -> Gated<Page<AppointmentInfo>> {
        self.authorize(session, Some(user_id), Operation::ListForUser)?;
        Ok(self.factory.user_list(user_id, page).execute().await)
    }

    pub async fn user_future_list(
        &self,
        session: Option<&UserSession>,
        user_id: UserId,
        page: PageRequest,
    ) -> Gated<Page<AppointmentInfo>> {
        self.authorize(session, Some(user_id), Operation::ListForUser)?;
        Ok(self.factory.user_future_list(user_id, page).execute().await)
    }

    pub async fn list_between_dates(
        &self,
        session: Option<&UserSession>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Gated<Vec<AppointmentInfo>> {
        self.authorize(session, None, Operation::ListBetweenDates)?;
        Ok(self.factory.list_between_dates(start, end).execute().await)
    }

    pub async fn search(
        &self,
        session: Option<&UserSession>,
        criteria: Vec<SearchCriterion>,
        page: PageRequest,
    ) -> Gated<Page<AppointmentInfo>> {
        self.authorize(session, None, Operation::Search)?;
        Ok(self.factory.search(criteria, page).execute().await)
    }
}
