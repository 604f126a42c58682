//! Public API surface for the scheduling core.
//!
//! This file consolidates the id newtypes, pagination types, and read-side
//! DTOs shared by the command layer and its callers. All types derive
//! Serialize/Deserialize for JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::appointment::{AppointmentKind, AppointmentStatus};

/// User identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Appointment identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub i64);

/// Radio telescope identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TelescopeId(pub i64);

/// Celestial body identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CelestialBodyId(pub i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AppointmentId {
    pub fn new(value: i64) -> Self {
        AppointmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TelescopeId {
    pub fn new(value: i64) -> Self {
        TelescopeId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl CelestialBodyId {
    pub fn new(value: i64) -> Self {
        CelestialBodyId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for TelescopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CelestialBodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pagination request: zero-based page index and page size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 25 }
    }
}

/// One page of query results along with the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total,
        }
    }

    /// Empty page for a request that matched nothing.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Map the page items, preserving the pagination metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}

/// Read-side coordinate representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateInfo {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    /// Right ascension in degrees, derived from hours/minutes/seconds.
    pub right_ascension: f64,
    /// Declination in degrees.
    pub declination: f64,
}

/// Read-side appointment representation returned by query commands.
///
/// Target data is carried in `coordinates` (Point, FreeControl, RasterScan)
/// or `celestial_body_id` (CelestialBody), matching the appointment kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentInfo {
    pub id: AppointmentId,
    pub user_id: UserId,
    pub telescope_id: TelescopeId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub status: AppointmentStatus,
    pub kind: AppointmentKind,
    #[serde(default)]
    pub coordinates: Vec<CoordinateInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celestial_body_id: Option<CelestialBodyId>,
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
