//! Appointment commands and their request types.
//!
//! One command per operation: create/request, update, cancel,
//! approve/deny, make-public, retrieve, list variants, and search.
//! Commands validate with [`crate::contracts::validation`] and perform
//! exactly one coherent mutation or query. None of them authorize.

pub mod approve_deny;
pub mod cancel;
pub mod create;
pub mod factory;
pub mod list;
pub mod make_public;
pub mod retrieve;
pub mod search;
pub mod update;

pub use approve_deny::{ApproveDeny, Decision};
pub use cancel::Cancel;
pub use create::{Create, Request};
pub use factory::AppointmentFactory;
pub use list::{ListBetweenDates, UserFutureList, UserList};
pub use make_public::MakePublic;
pub use retrieve::Retrieve;
pub use search::Search;
pub use update::Update;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CelestialBodyId, TelescopeId, UserId};
use crate::contracts::{validation, ErrorSet, ErrorTag};
use crate::models::appointment::AppointmentTarget;
use crate::models::coordinate::Coordinate;

/// Unvalidated coordinate input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRequest {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub declination: f64,
}

impl CoordinateRequest {
    fn to_coordinate(self) -> Coordinate {
        Coordinate::new(self.hours, self.minutes, self.seconds, self.declination)
    }
}

/// Unvalidated type-specific target input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetRequest {
    /// Single-coordinate point observation.
    Point(CoordinateRequest),
    /// Grid sweep delimited by two or more corner coordinates.
    RasterScan(Vec<CoordinateRequest>),
    /// Operator-controlled session starting at one coordinate.
    FreeControl(CoordinateRequest),
    /// Tracking of a known celestial body.
    CelestialBody(CelestialBodyId),
}

impl TargetRequest {
    /// Bounds-check every coordinate in the target, accumulating all
    /// violations.
    pub fn validate(&self) -> ErrorSet {
        let mut errors = ErrorSet::new();
        match self {
            Self::Point(c) | Self::FreeControl(c) => {
                errors.merge(validation::validate_coordinate(
                    c.hours,
                    c.minutes,
                    c.seconds,
                    c.declination,
                ));
            }
            Self::RasterScan(corners) => {
                if corners.len() < 2 {
                    errors.put(
                        ErrorTag::Coordinates,
                        "Raster scans require at least two corner coordinates",
                    );
                }
                for c in corners {
                    errors.merge(validation::validate_coordinate(
                        c.hours,
                        c.minutes,
                        c.seconds,
                        c.declination,
                    ));
                }
            }
            Self::CelestialBody(_) => {}
        }
        errors
    }

    /// Convert into the owned target entity. Call after `validate`.
    pub fn to_target(&self) -> AppointmentTarget {
        match self {
            Self::Point(c) => AppointmentTarget::Point(c.to_coordinate()),
            Self::RasterScan(corners) => AppointmentTarget::RasterScan(
                corners.iter().map(|c| c.to_coordinate()).collect(),
            ),
            Self::FreeControl(c) => AppointmentTarget::FreeControl(c.to_coordinate()),
            Self::CelestialBody(id) => AppointmentTarget::CelestialBody(*id),
        }
    }
}

/// Fields shared by create/request and update operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub user_id: UserId,
    pub telescope_id: TelescopeId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_public: bool,
    pub target: TargetRequest,
}

impl AppointmentRequest {
    /// Proposed duration in whole seconds.
    pub fn proposed_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
