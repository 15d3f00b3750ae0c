//! Factory for creating repository instances.

use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::FullRepository;

/// Factory for constructing repository instances behind the
/// [`FullRepository`] trait object the rest of the application consumes.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }
}
