//! # Larvae Monitoring Backend
//!
//! Backend for a larvae-tray monitoring dashboard. Client devices publish
//! per-tray measurements (length, width, area, weight, organism count) over
//! MQTT or a plain HTTP endpoint; this crate persists the readings and
//! serves aggregate views to the dashboard: per-tray growth series,
//! weight-distribution histograms and cross-tray combined/comparison views.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) shared by the HTTP API and the
//!   aggregation engine
//! - [`db`]: Repository pattern over the measurement and user stores
//! - [`services`]: The aggregation engine — pure functions turning ordered
//!   measurement streams into dashboard views
//! - [`http`]: Axum-based HTTP server, authentication and request handlers
//! - [`ingest`]: MQTT subscriber bridging the broker topic into the store
//!
//! Each aggregation call is a pure function of the records it is given; no
//! component holds state between requests. The repository is the only
//! shared resource, and both ingestion paths (HTTP and MQTT) write through
//! the same `FullRepository` handle.

pub mod api;
pub mod db;
pub mod http;
pub mod ingest;
pub mod services;
