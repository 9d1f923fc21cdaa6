//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure surfaced to an API caller maps onto one of these variants;
/// nothing is silently swallowed and the engine never retries on its own.
#[derive(Debug, Error)]
pub enum AppError {
    /// User or account lookup miss.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-positive amount, or negative where disallowed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Requested movement exceeds the account balance.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Requested movement exceeds the per-account limit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Transfer source and destination are the same account.
    #[error("Same account: {0}")]
    SameAccount(String),

    /// National id or account number already registered.
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// Bad credential pair on login.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token subject does not own the target account.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) => 400,
            Self::AuthenticationFailed(_) | Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::DuplicateIdentity(_) => 409,
            Self::InsufficientFunds(_) | Self::LimitExceeded(_) | Self::SameAccount(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable machine-readable code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::LimitExceeded(_) => "LIMIT_EXCEEDED",
            Self::SameAccount(_) => "SAME_ACCOUNT",
            Self::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
