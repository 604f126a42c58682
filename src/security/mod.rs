//! Authorization gate for the command layer.
//!
//! Commands never authorize themselves; the wrapper in this module
//! decides, per request and per owned resource, whether a command may
//! even run. Identity is passed explicitly as a [`UserSession`] — there
//! is no ambient security context.

pub mod access;
pub mod policy;
pub mod session;
pub mod wrapper;

pub use access::AccessReport;
pub use policy::{required_roles, Operation, RoleRequirement};
pub use session::UserSession;
pub use wrapper::{AppointmentWrapper, Gated};
