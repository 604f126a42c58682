//! Observation appointment entity and its lifecycle.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AppointmentId, AppointmentInfo, CelestialBodyId, TelescopeId, UserId};
use crate::models::coordinate::Coordinate;

/// Lifecycle state of an appointment.
///
/// The legal transitions are:
///
/// ```text
/// Requested -> Scheduled -> InProgress -> Completed
/// Requested -> Denied
/// any non-terminal -> Canceled
/// ```
///
/// `Completed`, `Canceled` and `Denied` are terminal; there is no
/// resurrection from a terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Requested,
    Scheduled,
    InProgress,
    Completed,
    Canceled,
    Denied,
}

impl AppointmentStatus {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Denied)
    }

    /// Whether an appointment in this state still occupies telescope time.
    ///
    /// Canceled and denied appointments release their window; completed
    /// ones are in the past and are excluded by the interval test instead.
    pub fn blocks_telescope(&self) -> bool {
        !matches!(self, Self::Canceled | Self::Denied)
    }

    /// Whether the lifecycle graph permits moving to `next` from here.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (Requested, Scheduled) | (Requested, Denied) => true,
            (Scheduled, InProgress) => true,
            (InProgress, Completed) => true,
            (current, Canceled) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Requested => "REQUESTED",
            Self::Scheduled => "SCHEDULED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Denied => "DENIED",
        };
        f.write_str(s)
    }
}

/// Observation mode of an appointment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentKind {
    Point,
    RasterScan,
    FreeControl,
    CelestialBody,
}

/// Type-specific target payload for an appointment.
///
/// Point and FreeControl observations track a single coordinate,
/// RasterScan sweeps a grid delimited by two or more corner coordinates,
/// and CelestialBody observations reference a known body by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppointmentTarget {
    Point(Coordinate),
    RasterScan(Vec<Coordinate>),
    FreeControl(Coordinate),
    CelestialBody(CelestialBodyId),
}

impl AppointmentTarget {
    pub fn kind(&self) -> AppointmentKind {
        match self {
            Self::Point(_) => AppointmentKind::Point,
            Self::RasterScan(_) => AppointmentKind::RasterScan,
            Self::FreeControl(_) => AppointmentKind::FreeControl,
            Self::CelestialBody(_) => AppointmentKind::CelestialBody,
        }
    }

    /// The coordinates this target owns, if any.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Self::Point(c) | Self::FreeControl(c) => std::slice::from_ref(c),
            Self::RasterScan(cs) => cs,
            Self::CelestialBody(_) => &[],
        }
    }

    pub fn celestial_body_id(&self) -> Option<CelestialBodyId> {
        match self {
            Self::CelestialBody(id) => Some(*id),
            _ => None,
        }
    }
}

/// A reservation of telescope time for one user over the half-open window
/// `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub user_id: UserId,
    pub telescope_id: TelescopeId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub status: AppointmentStatus,
    pub target: AppointmentTarget,
}

impl Appointment {
    /// Scheduled duration. Valid appointments always have a positive
    /// duration (`end_time > start_time`).
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Half-open interval intersection test against another window.
    ///
    /// Back-to-back windows (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }

    pub fn kind(&self) -> AppointmentKind {
        self.target.kind()
    }

    /// Read-side representation.
    pub fn to_info(&self) -> AppointmentInfo {
        AppointmentInfo {
            id: self.id,
            user_id: self.user_id,
            telescope_id: self.telescope_id,
            start_time: self.start_time,
            end_time: self.end_time,
            is_public: self.is_public,
            status: self.status,
            kind: self.kind(),
            coordinates: self.target.coordinates().iter().map(|c| c.to_info()).collect(),
            celestial_body_id: self.target.celestial_body_id(),
        }
    }
}
