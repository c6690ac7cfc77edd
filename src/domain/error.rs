use thiserror::Error;

/// Business-error taxonomy of the user service.
///
/// Callers compare by kind, never by message text. Anything from the
/// storage or hashing layers that does not map onto a recognized kind
/// surfaces as [`DomainError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("user not found")]
    NotFound,

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("password does not meet requirements")]
    InvalidPassword,

    #[error("user is blocked")]
    UserBlocked,

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Attaches operation context to an [`DomainError::Internal`] message.
    ///
    /// Recognized kinds pass through untouched so they stay comparable by
    /// kind after wrapping.
    pub fn context(self, operation: &str) -> Self {
        match self {
            Self::Internal(message) => Self::Internal(format!("{operation}: {message}")),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
