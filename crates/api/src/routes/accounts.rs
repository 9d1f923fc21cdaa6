//! Account directory routes: creation, lookup, and limit updates.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::routes::respond::{directory_error, error_response, require_owner};
use crate::routes::views::AccountView;
use caixa_db::AccountRepository;
use caixa_shared::AppError;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{number}", get(get_account))
        .route("/accounts/{number}/limit", patch(update_limit))
}

/// Request body for account creation.
#[derive(Debug, Deserialize)]
struct CreateAccountRequest {
    /// Initial withdrawal limit; defaults to zero.
    #[serde(default)]
    initial_limit: Decimal,
}

/// POST /accounts - Create an account for the authenticated user.
async fn create_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .create_account(user.national_id(), payload.initial_limit)
        .await
    {
        Ok(account) => {
            info!(number = account.number, "Account created");
            (StatusCode::CREATED, Json(AccountView::from(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            error_response(&directory_error(&e))
        }
    }
}

/// GET /accounts/{number} - Account by number with its transaction log.
async fn get_account(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_with_transactions(number).await {
        Ok(Some(aggregate)) => (StatusCode::OK, Json(AccountView::from(aggregate))).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("account {number}"))),
        Err(e) => {
            error!(error = %e, "Failed to fetch account");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// Request body for limit updates.
#[derive(Debug, Deserialize)]
struct UpdateLimitRequest {
    /// New withdrawal limit, must be non-negative.
    new_limit: Decimal,
}

/// PATCH /accounts/{number}/limit - Update the withdrawal limit.
async fn update_limit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(number): Path<i64>,
    Json(payload): Json<UpdateLimitRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let account = match repo.find_by_number(number).await {
        Ok(Some(a)) => a,
        Ok(None) => return error_response(&AppError::NotFound(format!("account {number}"))),
        Err(e) => {
            error!(error = %e, "Failed to fetch account");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    if let Err(e) = require_owner(&state, user.national_id(), &account).await {
        return error_response(&e);
    }

    match repo.update_limit(number, payload.new_limit).await {
        Ok(account) => {
            info!(number, new_limit = %payload.new_limit, "Withdrawal limit updated");
            (StatusCode::OK, Json(AccountView::from(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update limit");
            error_response(&directory_error(&e))
        }
    }
}
