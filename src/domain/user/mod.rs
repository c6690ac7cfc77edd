//! User domain
//!
//! Entities, the filter model, validation rules, and the repository
//! contract for user records.

mod entity;
mod filter;
mod repository;
mod validation;

pub use entity::{CreateUserInput, UpdateUserInput, User, UserId, UserStatus};
pub use filter::{canonical_order, Pagination, UserFilter};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
