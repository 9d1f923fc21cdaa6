//! User listing routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tracing::error;

use crate::AppState;
use crate::routes::respond::error_response;
use crate::routes::views::UserView;
use caixa_db::AccountRepository;
use caixa_shared::AppError;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// GET /users - All users with their accounts and transaction logs.
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_users_with_accounts().await {
        Ok(users) => {
            let views: Vec<UserView> = users.into_iter().map(UserView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list users");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
