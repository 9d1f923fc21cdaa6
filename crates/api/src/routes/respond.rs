//! Error mapping from the domain layers to API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use caixa_core::ops::RuleError;
use caixa_db::UserRepository;
use caixa_db::entities::accounts;
use caixa_db::repositories::{DirectoryError, OperationError};
use caixa_shared::AppError;

/// Renders an `AppError` as a JSON error response.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Maps a business-rule violation onto the API error taxonomy.
pub fn rule_error(err: &RuleError) -> AppError {
    match err {
        RuleError::InvalidAmount(_) | RuleError::NegativeLimit(_) => {
            AppError::InvalidAmount(err.to_string())
        }
        RuleError::LimitExceeded { .. } => AppError::LimitExceeded(err.to_string()),
        RuleError::InsufficientFunds { .. } => AppError::InsufficientFunds(err.to_string()),
        RuleError::SameAccount => AppError::SameAccount(err.to_string()),
    }
}

/// Maps an engine failure onto the API error taxonomy.
pub fn operation_error(err: &OperationError) -> AppError {
    match err {
        OperationError::AccountNotFound(number) => AppError::NotFound(format!("account {number}")),
        OperationError::Rule(rule) => rule_error(rule),
        OperationError::Database(e) => AppError::Database(e.to_string()),
    }
}

/// Maps a directory failure onto the API error taxonomy.
pub fn directory_error(err: &DirectoryError) -> AppError {
    match err {
        DirectoryError::UserNotFound(id) => AppError::NotFound(format!("user {id}")),
        DirectoryError::AccountNotFound(number) => AppError::NotFound(format!("account {number}")),
        DirectoryError::Rule(rule) => rule_error(rule),
        DirectoryError::Database(e) => AppError::Database(e.to_string()),
    }
}

/// Checks that the token subject owns the given account.
///
/// # Errors
///
/// Returns `Forbidden` for a non-owner, `Unauthorized` if the token
/// subject no longer exists, or `Database` on query failure.
pub async fn require_owner(
    state: &AppState,
    national_id: &str,
    account: &accounts::Model,
) -> Result<(), AppError> {
    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_national_id(national_id).await {
        Ok(Some(user)) if user.id == account.user_id => Ok(()),
        Ok(Some(_)) => Err(AppError::Forbidden(format!(
            "account {} is not owned by the authenticated user",
            account.number
        ))),
        Ok(None) => Err(AppError::Unauthorized(
            "token subject is no longer registered".to_string(),
        )),
        Err(e) => Err(AppError::Database(e.to_string())),
    }
}
