//! Repository implementations module.
//!
//! This module contains implementations of the repository traits:
//! - `local`: In-memory implementation for unit testing and local
//!   development (and the default backend for this service)
pub mod local;

pub use local::LocalRepository;
