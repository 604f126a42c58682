//! Radio telescope hardware reference.

use serde::{Deserialize, Serialize};

use crate::api::TelescopeId;

/// A shared telescope that appointments reserve time on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telescope {
    pub id: TelescopeId,
    pub name: String,
    /// Offline telescopes remain addressable; existing appointments are
    /// not rewritten when hardware goes down.
    pub online: bool,
}
