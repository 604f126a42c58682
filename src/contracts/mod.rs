//! Command contracts: the uniform execution model every operation follows.
//!
//! A [`Command`] is a fully constructed unit of work whose only operation
//! is `execute()`. It validates its own request, performs exactly one
//! coherent mutation or query, and returns `Result<Output, ErrorSet>` —
//! the single seam the authorization wrapper and transport layers depend
//! on without knowing operation-specific logic.
//!
//! Commands never authorize. The gate in front of them lives in
//! [`crate::security`].

pub mod appointment;
pub mod validation;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// Validation error tags for the scheduling domain.
///
/// Each tag names the request aspect a violation is about. A single
/// request can accumulate messages under many tags in one pass.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorTag {
    UserId,
    TelescopeId,
    AppointmentId,
    CelestialBodyId,
    StartTime,
    EndTime,
    Hours,
    Minutes,
    Seconds,
    Declination,
    Coordinates,
    Status,
    Public,
    AvailableTime,
    Overlap,
    Search,
    Storage,
}

/// Multi-valued mapping from [`ErrorTag`] to human-readable messages.
///
/// All independent violations for a request are collected here in one
/// validation pass; an empty set means "proceed". Messages per tag keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSet {
    errors: BTreeMap<ErrorTag, Vec<String>>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation.
    pub fn put(&mut self, tag: ErrorTag, message: impl Into<String>) {
        self.errors.entry(tag).or_default().push(message.into());
    }

    /// Build a set holding a single violation.
    pub fn of(tag: ErrorTag, message: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.put(tag, message);
        set
    }

    /// Fold another set's violations into this one.
    pub fn merge(&mut self, other: ErrorSet) {
        for (tag, messages) in other.errors {
            self.errors.entry(tag).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of distinct tags with at least one message.
    pub fn tag_count(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, tag: ErrorTag) -> bool {
        self.errors.contains_key(&tag)
    }

    /// Messages recorded under a tag, empty when the tag is clean.
    pub fn messages(&self, tag: ErrorTag) -> &[String] {
        self.errors.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorTag, &[String])> {
        self.errors.iter().map(|(tag, msgs)| (*tag, msgs.as_slice()))
    }

    /// `Ok(())` when empty, `Err(self)` otherwise. Lets validation code
    /// end with `errors.into_result()?`.
    pub fn into_result(self) -> Result<(), ErrorSet> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<RepositoryError> for ErrorSet {
    /// Storage faults crossing into the validation channel.
    ///
    /// Constraint violations are the storage-side conflict guard firing,
    /// so they come back as `Overlap`; everything else is an opaque
    /// `Storage` failure the core does not interpret.
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConstraintViolation { message, .. } => {
                ErrorSet::of(ErrorTag::Overlap, message)
            }
            other => ErrorSet::of(ErrorTag::Storage, other.to_string()),
        }
    }
}

/// Result of executing a command: exactly one of a value or an error set.
pub type CommandResult<T> = Result<T, ErrorSet>;

/// A single validated operation.
///
/// Implementations carry all constructed state (request plus repository
/// collaborators); `execute` takes no further arguments.
#[async_trait]
pub trait Command: Send + Sync {
    type Output: Send;

    /// Validate the request and, on success, perform the operation.
    ///
    /// All validation violations are reported together; the operation
    /// runs only when the set is empty.
    async fn execute(&self) -> CommandResult<Self::Output>;
}
