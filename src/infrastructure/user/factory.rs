//! Repository factory for composition-time backend selection

use std::sync::Arc;

use super::postgres_repository::{PostgresConfig, PostgresUserRepository};
use super::repository::InMemoryUserRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum RepositoryConfig {
    /// In-memory backend (tests, demos, single-process deployments)
    InMemory,
    /// PostgreSQL backend
    Postgres(PostgresConfig),
}

/// Creates repository instances from configuration.
///
/// The backend is chosen here, at composition time; nothing downstream
/// inspects the concrete type.
#[derive(Debug)]
pub struct UserRepositoryFactory;

impl UserRepositoryFactory {
    /// Creates the configured backend. The Postgres variant connects its
    /// pool and bootstraps the schema.
    pub async fn create(config: &RepositoryConfig) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config {
            RepositoryConfig::InMemory => Ok(Arc::new(InMemoryUserRepository::new())),
            RepositoryConfig::Postgres(pg_config) => {
                let repository = PostgresUserRepository::connect(pg_config).await?;
                repository.ensure_table().await?;
                Ok(Arc::new(repository))
            }
        }
    }

    pub fn create_in_memory() -> Arc<InMemoryUserRepository> {
        Arc::new(InMemoryUserRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::{User, UserFilter, UserId};

    #[tokio::test]
    async fn test_in_memory_backend_is_usable_through_the_contract() {
        let repository = UserRepositoryFactory::create(&RepositoryConfig::InMemory)
            .await
            .unwrap();

        repository
            .create(User::new(
                UserId::new("user-1"),
                "a@example.com",
                "Test User",
                "digest",
                Utc::now(),
            ))
            .await
            .unwrap();

        assert_eq!(repository.count(&UserFilter::default()).await.unwrap(), 1);
    }
}
