//! User repository contract

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::User;
use super::filter::{Pagination, UserFilter};
use crate::domain::error::DomainError;

/// Storage-backend-agnostic persistence contract for user records.
///
/// `find` and `count` must agree: for any filter, `count` equals the
/// length of an unlimited `find`. Results come back newest first with id
/// as the tie-break, identically in every implementation.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Inserts a new record. The uniqueness check and the insert are a
    /// single atomic step: fails with [`DomainError::AlreadyExists`] when
    /// another record holds the same id or email.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Returns records matching the filter, paginated after filtering.
    async fn find(
        &self,
        filter: &UserFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<User>, DomainError>;

    /// Returns the number of records matching the filter.
    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError>;

    /// Replaces the record with the same id. Fails with
    /// [`DomainError::NotFound`] when no such record exists, and with
    /// [`DomainError::AlreadyExists`] when the new email collides with
    /// another record.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Removes every record matching the filter and reports how many were
    /// removed. A filter matching nothing succeeds with 0; an all-empty
    /// filter matches every record.
    async fn delete(&self, filter: &UserFilter) -> Result<usize, DomainError>;
}
