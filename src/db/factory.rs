//! Factory for creating repository instances.
//!
//! The factory resolves a backend name (from configuration) to a
//! concrete repository, keeping backend selection out of the business
//! logic entirely.

use std::str::FromStr;
use std::sync::Arc;

use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Available repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory backend for testing and local development.
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(RepositoryType::Local),
            other => Err(format!(
                "Unknown repository type '{}'. Supported: local",
                other
            )),
        }
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository of the requested type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(super::repositories::LocalRepository::new())
    }

    /// Create a repository from a backend name.
    pub fn create_from_name(name: &str) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type =
            RepositoryType::from_str(name).map_err(RepositoryError::ConfigurationError)?;
        Self::create(repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("In-Memory").unwrap(),
            RepositoryType::Local
        );
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[test]
    fn creates_local_repository() {
        let repo = RepositoryFactory::create_from_name("local");
        assert!(repo.is_ok());
    }
}
