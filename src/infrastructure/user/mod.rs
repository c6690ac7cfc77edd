//! User infrastructure module
//!
//! Storage backends for the user repository contract, the capability
//! adapters (hashing, id generation, clock), and the service orchestrating
//! business rules over them.

mod clock;
mod factory;
mod id_generator;
mod password;
mod postgres_repository;
mod query_builder;
mod repository;
mod service;

pub use clock::{Clock, SystemClock};
pub use factory::{RepositoryConfig, UserRepositoryFactory};
pub use id_generator::{IdGenerator, UuidGenerator};
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::{PostgresConfig, PostgresUserRepository};
pub use repository::InMemoryUserRepository;
pub use service::{ListUsersFilter, UserPage, UserService};
