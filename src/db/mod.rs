//! Storage abstractions for the scheduling core.
//!
//! The command core talks to storage through narrow capability traits
//! (Repository pattern), so different backends can be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Command layer (contracts) + Authorization (security)   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: trait definitions for storage operations
//! - `repositories::local`: in-memory implementation for unit testing and
//!   local development
//! - `factory`: factory for creating repository instances
//! - `repo_config`: TOML configuration file support
//! - `models`: query-side types shared with the command layer

pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use models::SearchCriterion;
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    AllottedTimeCapRepository, AppointmentRepository, ErrorContext, FullRepository,
    NewAppointment, RepositoryError, RepositoryResult, RoleRepository, TelescopeRepository,
    UserRepository,
};
