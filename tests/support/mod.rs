#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use scopetime::api::{TelescopeId, UserId};
use scopetime::contracts::appointment::{
    AppointmentFactory, AppointmentRequest, CoordinateRequest, TargetRequest,
};
use scopetime::db::repositories::LocalRepository;
use scopetime::models::{Role, Telescope, User, UserRole};
use scopetime::security::{AppointmentWrapper, UserSession};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A repository seeded with two users (ids 1, 2), an admin (id 9), and
/// two telescopes (ids 1, 2). User 9 has an approved Admin role.
pub fn seeded_repository() -> Arc<LocalRepository> {
    let repo = LocalRepository::new();
    for (id, email) in [(1, "alice@obs.example"), (2, "bob@obs.example"), (9, "admin@obs.example")]
    {
        repo.insert_user(User {
            id: UserId::new(id),
            email: email.to_string(),
            first_name: format!("user{id}"),
            last_name: "Test".to_string(),
        });
    }
    repo.insert_role(UserRole::approved(UserId::new(9), Role::Admin));
    for id in [1, 2] {
        repo.insert_telescope(Telescope {
            id: TelescopeId::new(id),
            name: format!("scope-{id}"),
            online: true,
        });
    }
    Arc::new(repo)
}

pub fn factory(repo: Arc<LocalRepository>) -> AppointmentFactory {
    AppointmentFactory::from_repository(repo)
}

pub fn wrapper(repo: Arc<LocalRepository>) -> AppointmentWrapper {
    AppointmentWrapper::new(AppointmentFactory::from_repository(repo.clone()), repo)
}

pub fn member_session(user_id: i64) -> UserSession {
    UserSession::new(UserId::new(user_id), vec![Role::Member])
}

pub fn admin_session(user_id: i64) -> UserSession {
    UserSession::new(UserId::new(user_id), vec![Role::Admin])
}

pub fn researcher_session(user_id: i64) -> UserSession {
    UserSession::new(UserId::new(user_id), vec![Role::Researcher])
}

/// A fixed instant comfortably in the future relative to wall clock.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 10, 0, 0).single().expect("valid fixture time")
}

pub fn point_target() -> TargetRequest {
    TargetRequest::Point(CoordinateRequest {
        hours: 5,
        minutes: 30,
        seconds: 0,
        declination: 22.0,
    })
}

/// A valid point-target request for user 1 on telescope 1, offset from
/// [`base_time`] by `start_min..end_min` minutes.
pub fn request_between(user_id: i64, start_min: i64, end_min: i64) -> AppointmentRequest {
    AppointmentRequest {
        user_id: UserId::new(user_id),
        telescope_id: TelescopeId::new(1),
        start_time: base_time() + Duration::minutes(start_min),
        end_time: base_time() + Duration::minutes(end_min),
        is_public: true,
        target: point_target(),
    }
}
