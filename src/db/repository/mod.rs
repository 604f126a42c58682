//! Abstract repository interfaces the command core depends on.
//!
//! The core treats storage as a set of narrow capability traits with
//! simple CRUD contracts. Implementations own durability, visibility and
//! their own timeout/retry policy.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

pub mod error;

mod appointment;
mod telescope;
mod time_cap;
mod user;

pub use appointment::{AppointmentRepository, NewAppointment};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use telescope::TelescopeRepository;
pub use time_cap::AllottedTimeCapRepository;
pub use user::{RoleRepository, UserRepository};

use async_trait::async_trait;

/// Union of all repository capabilities plus a liveness probe.
///
/// The command factory takes one `Arc<dyn FullRepository>` and hands the
/// individual capabilities to the commands that need them.
#[async_trait]
pub trait FullRepository:
    UserRepository
    + TelescopeRepository
    + AppointmentRepository
    + RoleRepository
    + AllottedTimeCapRepository
{
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
