//! Authentication types for JWT claims and auth payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// The subject is the user's national id, matching the login identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (national id of the authenticated user).
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(national_id: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: national_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the national id of the token subject.
    #[must_use]
    pub fn national_id(&self) -> &str {
        &self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User national id.
    pub national_id: String,
    /// User password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Token type, always "bearer".
    pub token_type: &'static str,
    /// Display name of the authenticated user.
    pub user_name: String,
    /// Id of the authenticated user.
    pub user_id: Uuid,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// National id (unique, immutable once created).
    pub national_id: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Postal address.
    pub address: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}
