//! Money-movement routes: single-account operations and transfers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::routes::respond::{error_response, operation_error, require_owner};
use crate::routes::views::AccountView;
use caixa_core::ops::OperationKind;
use caixa_db::{AccountRepository, OperationRepository};
use caixa_shared::AppError;

/// Creates the operation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/{number}/operations", post(operate))
        .route("/transfers", post(transfer))
}

/// Request body for a single-account operation.
#[derive(Debug, Deserialize)]
struct OperateRequest {
    /// "deposit" or "withdraw".
    kind: OperationKind,
    /// Positive amount.
    amount: Decimal,
}

/// POST /accounts/{number}/operations - Deposit into or withdraw from an account.
///
/// Withdrawals require the token subject to own the account; deposits only
/// require a valid token, since paying into another account is legitimate.
async fn operate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(number): Path<i64>,
    Json(payload): Json<OperateRequest>,
) -> impl IntoResponse {
    if payload.kind == OperationKind::Withdraw {
        let accounts = AccountRepository::new((*state.db).clone());
        let account = match accounts.find_by_number(number).await {
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
    }

    let ops = OperationRepository::new((*state.db).clone());
    let result = match payload.kind {
        OperationKind::Deposit => ops.deposit(number, payload.amount).await,
        OperationKind::Withdraw => ops.withdraw(number, payload.amount).await,
    };

    match result {
        Ok(account) => {
            info!(number, kind = %caixa_core::ops::MovementKind::from(payload.kind), amount = %payload.amount, "Operation applied");
            (StatusCode::OK, Json(AccountView::from(account))).into_response()
        }
        Err(e) => {
            info!(number, error = %e, "Operation rejected");
            error_response(&operation_error(&e))
        }
    }
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
struct TransferRequest {
    /// Account number money leaves from.
    source_number: i64,
    /// Account number money arrives at.
    dest_number: i64,
    /// Positive amount.
    amount: Decimal,
}

/// Status message returned on a successful transfer.
#[derive(Debug, Serialize)]
struct TransferResponse {
    /// Human-readable status.
    message: String,
}

/// POST /transfers - Atomic transfer between two accounts.
///
/// The source account must be owned by the token subject.
async fn transfer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let accounts = AccountRepository::new((*state.db).clone());
    match accounts.find_by_number(payload.source_number).await {
        Ok(Some(source)) => {
            if let Err(e) = require_owner(&state, user.national_id(), &source).await {
                return error_response(&e);
            }
        }
        // let the engine produce the canonical validation order for
        // missing accounts vs invalid amounts
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Failed to fetch source account");
            return error_response(&AppError::Database(e.to_string()));
        }
    }

    let ops = OperationRepository::new((*state.db).clone());
    match ops
        .transfer(payload.source_number, payload.dest_number, payload.amount)
        .await
    {
        Ok(()) => {
            info!(
                source = payload.source_number,
                dest = payload.dest_number,
                amount = %payload.amount,
                "Transfer completed"
            );
            (
                StatusCode::OK,
                Json(TransferResponse {
                    message: format!(
                        "Transferred {} from account {} to account {}",
                        payload.amount, payload.source_number, payload.dest_number
                    ),
                }),
            )
                .into_response()
        }
        Err(e) => {
            info!(
                source = payload.source_number,
                dest = payload.dest_number,
                error = %e,
                "Transfer rejected"
            );
            error_response(&operation_error(&e))
        }
    }
}
