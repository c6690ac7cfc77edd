//! User Service Core
//!
//! Transport-agnostic business layer for user-account records:
//! - validation and lifecycle rules in [`UserService`]
//! - a declarative filter model shared by every storage backend
//! - two repository implementations (in-memory map, PostgreSQL)
//!
//! Wire protocols, process startup, and shutdown live in consuming
//! applications; this crate only exposes the operations and their error
//! taxonomy.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::user::{
    CreateUserInput, Pagination, UpdateUserInput, User, UserFilter, UserId, UserRepository,
    UserStatus,
};
pub use domain::DomainError;
pub use infrastructure::observability::{init_logging, init_metrics, PrometheusMetrics};
pub use infrastructure::user::{
    Argon2Hasher, Clock, IdGenerator, InMemoryUserRepository, ListUsersFilter, PasswordHasher,
    PostgresConfig, PostgresUserRepository, RepositoryConfig, SystemClock, UserPage,
    UserRepositoryFactory, UserService, UuidGenerator,
};
