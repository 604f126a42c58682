//! Per-user ceiling on cumulative scheduled observation time.

use serde::{Deserialize, Serialize};

use crate::api::UserId;

/// Quota record limiting how much observation time a user may have
/// scheduled at once. Mutated only by admin operations; read by quota
/// validation.
///
/// Policy: a cap of `None` or `Some(0)` means unlimited. Zero is treated
/// as "no cap configured", not "no time allowed" — a user who should be
/// locked out has their roles revoked instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllottedTimeCap {
    pub user_id: UserId,
    /// Ceiling in seconds, if one is configured.
    pub allotted_seconds: Option<i64>,
}

impl AllottedTimeCap {
    pub fn unlimited(user_id: UserId) -> Self {
        Self {
            user_id,
            allotted_seconds: None,
        }
    }

    pub fn limited(user_id: UserId, seconds: i64) -> Self {
        Self {
            user_id,
            allotted_seconds: Some(seconds),
        }
    }

    /// The enforceable ceiling, if any.
    pub fn effective_limit(&self) -> Option<i64> {
        match self.allotted_seconds {
            None | Some(0) => None,
            Some(s) => Some(s),
        }
    }
}
