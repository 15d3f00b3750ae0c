//! Database module for measurement and user storage.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped without
//! touching the aggregation engine or the HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (HTTP handlers, MQTT subscriber)      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! │  - MeasurementRepository: append-only readings           │
//! │  - UserRepository: credential storage                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The measurement table is append-only: records are immutable once stored
//! and ordered by capture timestamp. Tray identifiers are discovered by a
//! distinct-values scan (`list_tray_ids`), never declared up front.
//!
//! Store initialization and demo-data seeding are an explicit, idempotent
//! operation ([`seed::initialize`]) invoked once by the process entry
//! point — never a side effect of construction.

pub mod factory;
pub mod models;
pub mod password;
pub mod repositories;
pub mod repository;
pub mod seed;

pub use factory::RepositoryFactory;
pub use models::{MeasurementRecord, NewMeasurement, User};
pub use repositories::LocalRepository;
pub use repository::{
    FullRepository, MeasurementRepository, RepositoryError, RepositoryResult, UserRepository,
};
