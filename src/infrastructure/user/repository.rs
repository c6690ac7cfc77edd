//! In-memory user repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::{canonical_order, Pagination, User, UserFilter, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`UserRepository`].
///
/// Records live in a map behind a single reader/writer lock: readers run
/// concurrently, a writer excludes everyone else. Uniqueness checks happen
/// inside the write section, making create an atomic check-and-insert.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with records.
    pub fn with_users(users: Vec<User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        Self {
            users: RwLock::new(map),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(DomainError::AlreadyExists);
        }

        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(DomainError::AlreadyExists);
        }

        users.insert(user.id().clone(), user.clone());

        Ok(user)
    }

    async fn find(
        &self,
        filter: &UserFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut matched: Vec<User> = users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();
        matched.sort_by(canonical_order);

        Ok(match pagination {
            Some(pagination) => pagination.slice(&matched),
            None => matched,
        })
    }

    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let users = self.users.read().await;

        Ok(users.values().filter(|user| filter.matches(user)).count())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(user.id()) {
            return Err(DomainError::NotFound);
        }

        let email_taken = users
            .values()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id());
        if email_taken {
            return Err(DomainError::AlreadyExists);
        }

        users.insert(user.id().clone(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let mut users = self.users.write().await;

        let to_delete: Vec<UserId> = users
            .values()
            .filter(|user| filter.matches(user))
            .map(|user| user.id().clone())
            .collect();

        for id in &to_delete {
            users.remove(id);
        }

        Ok(to_delete.len())
    }
}
