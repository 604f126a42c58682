//! In-memory repository implementation.
//!
//! Backs the full repository surface with `parking_lot`-guarded maps.
//! Useful for unit tests and local development; state is lost on drop.
//!
//! The appointment exclusion constraint (telescope, active status,
//! interval) is enforced inside `save`/`update` while the write lock is
//! held, which makes this implementation an honest model of the database
//! constraint production storage provides.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;

use crate::api::{AppointmentId, Page, PageRequest, TelescopeId, UserId};
use crate::db::models::SearchCriterion;
use crate::db::repository::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::repository::{
    AllottedTimeCapRepository, AppointmentRepository, FullRepository, NewAppointment,
    RoleRepository, TelescopeRepository, UserRepository,
};
use crate::models::appointment::Appointment;
use crate::models::telescope::Telescope;
use crate::models::time_cap::AllottedTimeCap;
use crate::models::user::{Role, User, UserRole};

/// In-memory repository for tests and local development.
pub struct LocalRepository {
    users: RwLock<BTreeMap<UserId, User>>,
    telescopes: RwLock<BTreeMap<TelescopeId, Telescope>>,
    appointments: RwLock<BTreeMap<AppointmentId, Appointment>>,
    roles: RwLock<Vec<UserRole>>,
    caps: RwLock<BTreeMap<UserId, AllottedTimeCap>>,
    next_appointment_id: AtomicI64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            telescopes: RwLock::new(BTreeMap::new()),
            appointments: RwLock::new(BTreeMap::new()),
            roles: RwLock::new(Vec::new()),
            caps: RwLock::new(BTreeMap::new()),
            next_appointment_id: AtomicI64::new(1),
        }
    }

    /// Seed a user. Test/setup helper; not part of the repository traits.
    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    /// Seed a telescope.
    pub fn insert_telescope(&self, telescope: Telescope) {
        self.telescopes.write().insert(telescope.id, telescope);
    }

    /// Seed a role record.
    pub fn insert_role(&self, role: UserRole) {
        self.roles.write().push(role);
    }

    /// Checks the exclusion constraint against all stored appointments.
    /// Caller must hold the appointments write lock.
    fn constraint_violated(
        appointments: &BTreeMap<AppointmentId, Appointment>,
        telescope_id: TelescopeId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status_blocks: bool,
        exclude: Option<AppointmentId>,
    ) -> Option<AppointmentId> {
        if !status_blocks {
            return None;
        }
        appointments
            .values()
            .filter(|a| Some(a.id) != exclude)
            .filter(|a| a.telescope_id == telescope_id && a.status.blocks_telescope())
            .find(|a| a.overlaps(start, end))
            .map(|a| a.id)
    }

    fn paginate(mut items: Vec<Appointment>, page: PageRequest) -> Page<Appointment> {
        items.sort_by_key(|a| (a.start_time, a.id));
        let total = items.len();
        let items = items
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();
        Page::new(items, page, total)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn user_exists(&self, id: UserId) -> RepositoryResult<bool> {
        Ok(self.users.read().contains_key(&id))
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }
}

#[async_trait]
impl TelescopeRepository for LocalRepository {
    async fn telescope_exists(&self, id: TelescopeId) -> RepositoryResult<bool> {
        Ok(self.telescopes.read().contains_key(&id))
    }

    async fn find_telescope(&self, id: TelescopeId) -> RepositoryResult<Option<Telescope>> {
        Ok(self.telescopes.read().get(&id).cloned())
    }
}

#[async_trait]
impl RoleRepository for LocalRepository {
    async fn approved_roles_for_user(&self, id: UserId) -> RepositoryResult<Vec<Role>> {
        Ok(self
            .roles
            .read()
            .iter()
            .filter(|r| r.user_id == id && r.approved)
            .map(|r| r.role)
            .collect())
    }

    async fn roles_for_user(&self, id: UserId) -> RepositoryResult<Vec<UserRole>> {
        Ok(self
            .roles
            .read()
            .iter()
            .filter(|r| r.user_id == id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AllottedTimeCapRepository for LocalRepository {
    async fn cap_for_user(&self, id: UserId) -> RepositoryResult<Option<AllottedTimeCap>> {
        Ok(self.caps.read().get(&id).copied())
    }

    async fn set_cap(&self, cap: AllottedTimeCap) -> RepositoryResult<()> {
        self.caps.write().insert(cap.user_id, cap);
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for LocalRepository {
    async fn appointment_exists(&self, id: AppointmentId) -> RepositoryResult<bool> {
        Ok(self.appointments.read().contains_key(&id))
    }

    async fn find_appointment(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        Ok(self.appointments.read().get(&id).cloned())
    }

    async fn save(&self, appointment: NewAppointment) -> RepositoryResult<AppointmentId> {
        let mut appointments = self.appointments.write();

        if let Some(blocking) = Self::constraint_violated(
            &appointments,
            appointment.telescope_id,
            appointment.start_time,
            appointment.end_time,
            appointment.status.blocks_telescope(),
            None,
        ) {
            return Err(RepositoryError::constraint_violation(
                "appointment window overlaps an active appointment",
                ErrorContext::new("save_appointment")
                    .with_entity("appointment")
                    .with_details(format!("conflicts with appointment {}", blocking)),
            ));
        }

        let id = AppointmentId::new(self.next_appointment_id.fetch_add(1, Ordering::SeqCst));
        debug!(
            "save appointment {} for user {} on telescope {}",
            id, appointment.user_id, appointment.telescope_id
        );
        appointments.insert(
            id,
            Appointment {
                id,
                user_id: appointment.user_id,
                telescope_id: appointment.telescope_id,
                start_time: appointment.start_time,
                end_time: appointment.end_time,
                is_public: appointment.is_public,
                status: appointment.status,
                target: appointment.target,
            },
        );
        Ok(id)
    }

    async fn update(&self, appointment: Appointment) -> RepositoryResult<()> {
        let mut appointments = self.appointments.write();

        if !appointments.contains_key(&appointment.id) {
            return Err(RepositoryError::not_found_with_context(
                "appointment does not exist",
                ErrorContext::new("update_appointment")
                    .with_entity("appointment")
                    .with_entity_id(appointment.id),
            ));
        }

        if let Some(blocking) = Self::constraint_violated(
            &appointments,
            appointment.telescope_id,
            appointment.start_time,
            appointment.end_time,
            appointment.status.blocks_telescope(),
            Some(appointment.id),
        ) {
            return Err(RepositoryError::constraint_violation(
                "appointment window overlaps an active appointment",
                ErrorContext::new("update_appointment")
                    .with_entity("appointment")
                    .with_entity_id(appointment.id)
                    .with_details(format!("conflicts with appointment {}", blocking)),
            ));
        }

        appointments.insert(appointment.id, appointment);
        Ok(())
    }

    async fn find_conflicts(
        &self,
        telescope_id: TelescopeId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut conflicts: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| Some(a.id) != exclude)
            .filter(|a| a.telescope_id == telescope_id && a.status.blocks_telescope())
            .filter(|a| a.overlaps(start, end))
            .cloned()
            .collect();
        conflicts.sort_by_key(|a| (a.start_time, a.id));
        Ok(conflicts)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>> {
        let items: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        Ok(Self::paginate(items, page))
    }

    async fn find_future_by_user(
        &self,
        user_id: UserId,
        after: DateTime<Utc>,
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>> {
        let items: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.user_id == user_id && a.start_time > after)
            .cloned()
            .collect();
        Ok(Self::paginate(items, page))
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut items: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| a.overlaps(start, end))
            .cloned()
            .collect();
        items.sort_by_key(|a| (a.start_time, a.id));
        Ok(items)
    }

    async fn total_scheduled_seconds(&self, user_id: UserId) -> RepositoryResult<i64> {
        Ok(self
            .appointments
            .read()
            .values()
            .filter(|a| a.user_id == user_id && a.status.blocks_telescope())
            .map(|a| a.duration().num_seconds())
            .sum())
    }

    async fn search(
        &self,
        criteria: &[SearchCriterion],
        page: PageRequest,
    ) -> RepositoryResult<Page<Appointment>> {
        let items: Vec<Appointment> = self
            .appointments
            .read()
            .values()
            .filter(|a| criteria.iter().all(|c| c.matches(a)))
            .cloned()
            .collect();
        Ok(Self::paginate(items, page))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
