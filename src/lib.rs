//! # Scopetime
//!
//! Command core for telescope observation scheduling.
//!
//! This crate provides the business-rule layer of an observation booking
//! system: every state change is expressed as a self-validating command
//! that either fully succeeds or reports every rule violation it found,
//! keyed by a closed error-tag vocabulary.
//!
//! ## Features
//!
//! - **Commands**: Create, request, update, cancel, approve/deny, publish,
//!   retrieve, list, and search observation appointments
//! - **Validation**: Temporal windows, equatorial coordinate bounds,
//!   referential checks, conflict detection, and per-user time quotas
//! - **Authorization**: Ownership-conditioned role gating in front of the
//!   command factory, with structured denial reports
//! - **Storage**: Repository traits with an in-memory implementation that
//!   enforces the telescope/interval exclusion constraint
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes, pagination, and response DTOs
//! - [`models`]: Domain entities and their state machines
//! - [`contracts`]: The command abstraction, validation rules, and the
//!   appointment command set with its factory
//! - [`db`]: Repository traits, the local backend, and its factory
//! - [`security`]: Sessions, the role policy, and the gating wrapper

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod contracts;

pub mod db;
pub mod models;

pub mod security;
