//! User service orchestrating business rules over injected capabilities

use std::sync::Arc;

use tracing::{debug, instrument};

use super::clock::Clock;
use super::id_generator::IdGenerator;
use super::password::PasswordHasher;
use crate::domain::user::{
    validate_email, validate_password, CreateUserInput, Pagination, UpdateUserInput, User,
    UserFilter, UserId, UserRepository, UserStatus,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::metrics;

/// Page size when the caller does not request one.
const DEFAULT_LIST_LIMIT: i64 = 20;
/// Hard cap on the page size.
const MAX_LIST_LIMIT: i64 = 100;

/// List request: a filter plus a caller-supplied window, clamped by
/// [`UserService::list`].
#[derive(Debug, Clone, Default)]
pub struct ListUsersFilter {
    pub filter: UserFilter,
    pub limit: i64,
    pub offset: i64,
}

/// One page of users together with the total match count, for client-side
/// pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: usize,
}

/// Business-rule layer for user records.
///
/// A stateless orchestrator over the injected repository and capability
/// contracts; repositories know only filtering and storage mechanics, this
/// service is the only component that knows business rules.
#[derive(Debug)]
pub struct UserService<R, H, G, C>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    G: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    id_generator: Arc<G>,
    clock: Arc<C>,
}

impl<R, H, G, C> UserService<R, H, G, C>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    G: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repository: Arc<R>, hasher: Arc<H>, id_generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            id_generator,
            clock,
        }
    }

    /// Returns a single record matching the filter, or `NotFound`.
    async fn find_one(&self, filter: UserFilter) -> Result<User, DomainError> {
        let users = self
            .repository
            .find(&filter, Some(Pagination::new(1, 0)))
            .await?;

        users.into_iter().next().ok_or(DomainError::NotFound)
    }

    /// Creates a new user.
    ///
    /// Validation failures surface before any repository or hashing call.
    /// The duplicate-email lookup is a fast path that avoids hashing work;
    /// the repository's atomic check-and-insert closes the race with
    /// concurrent creates.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateUserInput) -> Result<User, DomainError> {
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        match self.find_one(UserFilter::by_email(&input.email)).await {
            Ok(_) => return Err(DomainError::AlreadyExists),
            Err(DomainError::NotFound) => {}
            Err(e) => return Err(e.context("check existing user")),
        }

        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(|e| e.context("hash password"))?;

        let now = self.clock.now();
        let user = User::new(
            self.id_generator.generate(),
            input.email,
            input.name,
            password_hash,
            now,
        );

        let created = self
            .repository
            .create(user)
            .await
            .map_err(|e| e.context("create user"))?;

        metrics::record_user_created();
        debug!(user_id = %created.id(), "user created");

        Ok(created)
    }

    /// Returns the user with the given id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.find_one(UserFilter::by_id(id.clone()))
            .await
            .map_err(|e| e.context("get user"))
    }

    /// Applies a partial update to the user with the given id.
    ///
    /// Blocked users reject every update, including status-only ones;
    /// unblocking is an administrative path outside this service.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &UserId, input: UpdateUserInput) -> Result<User, DomainError> {
        let mut user = self
            .find_one(UserFilter::by_id(id.clone()))
            .await
            .map_err(|e| e.context("get user"))?;

        if user.is_blocked() {
            return Err(DomainError::UserBlocked);
        }

        if let Some(email) = input.email {
            validate_email(&email)?;
            user.set_email(email);
        }

        if let Some(name) = input.name {
            user.set_name(name);
        }

        if let Some(status) = input.status {
            user.set_status(status);
        }

        user.touch(self.clock.now());

        let updated = self
            .repository
            .update(&user)
            .await
            .map_err(|e| e.context("update user"))?;

        if updated.status() == UserStatus::Blocked {
            metrics::record_user_blocked();
        }
        debug!(user_id = %updated.id(), "user updated");

        Ok(updated)
    }

    /// Deletes every user matching the filter and returns the count.
    /// A filter matching nothing succeeds with 0.
    #[instrument(skip(self, filter))]
    pub async fn delete(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let deleted = self
            .repository
            .delete(filter)
            .await
            .map_err(|e| e.context("delete users"))?;

        if deleted > 0 {
            metrics::record_users_deleted(deleted as u64);
        }
        debug!(deleted, "users deleted");

        Ok(deleted)
    }

    /// Lists users with a clamped window and the total match count.
    ///
    /// `find` and `count` run against the same filter, so the page and the
    /// total are always consistent with each other.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: ListUsersFilter) -> Result<UserPage, DomainError> {
        let mut limit = filter.limit;
        if limit <= 0 {
            limit = DEFAULT_LIST_LIMIT;
        }
        if limit > MAX_LIST_LIMIT {
            limit = MAX_LIST_LIMIT;
        }
        let offset = filter.offset.max(0);

        let pagination = Pagination::new(limit as usize, offset as usize);

        let users = self
            .repository
            .find(&filter.filter, Some(pagination))
            .await
            .map_err(|e| e.context("list users"))?;

        let total = self
            .repository
            .count(&filter.filter)
            .await
            .map_err(|e| e.context("count users"))?;

        Ok(UserPage { users, total })
    }
}
