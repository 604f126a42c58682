//! Domain entities for the scheduling core.

pub mod appointment;
pub mod coordinate;
pub mod telescope;
pub mod time_cap;
pub mod user;

pub use appointment::{Appointment, AppointmentKind, AppointmentStatus, AppointmentTarget};
pub use coordinate::Coordinate;
pub use telescope::Telescope;
pub use time_cap::AllottedTimeCap;
pub use user::{Role, User, UserRole};
