//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across focused traits so implementations
//! stay testable:
//!
//! - [`error`]: Error types for repository operations
//! - [`measurement`]: Append-only measurement storage and ordered queries
//! - [`user`]: User credential storage
//!
//! For functions that need the whole store, use the [`FullRepository`]
//! trait bound; it is blanket-implemented for any type implementing both
//! traits.

pub mod error;
pub mod measurement;
pub mod user;

pub use error::{RepositoryError, RepositoryResult};
pub use measurement::MeasurementRepository;
pub use user::UserRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: MeasurementRepository + UserRepository {}

impl<T> FullRepository for T where T: MeasurementRepository + UserRepository {}
