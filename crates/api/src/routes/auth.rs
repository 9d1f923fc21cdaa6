//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::AppState;
use crate::routes::respond::error_response;
use crate::routes::views::RegisteredUserView;
use caixa_core::auth::{hash_password, verify_password};
use caixa_db::UserRepository;
use caixa_db::repositories::CreateUserInput;
use caixa_shared::AppError;
use caixa_shared::auth::{LoginRequest, LoginResponse, RegisterRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.national_id_exists(&payload.national_id).await {
        Ok(true) => {
            return error_response(&AppError::DuplicateIdentity(format!(
                "national id {} is already registered",
                payload.national_id
            )));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking national id");
            return error_response(&AppError::Database(e.to_string()));
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return error_response(&AppError::Internal(
                "an error occurred during registration".to_string(),
            ));
        }
    };

    let user = match user_repo
        .create(CreateUserInput {
            name: payload.name,
            national_id: payload.national_id,
            birth_date: payload.birth_date,
            address: payload.address,
            password_hash,
        })
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    info!(user_id = %user.id, "New user registered");

    (StatusCode::CREATED, Json(RegisteredUserView::from(user))).into_response()
}

/// POST /auth/login - Authenticate and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Unknown id and bad password are indistinguishable to the caller.
    let invalid_credentials =
        || AppError::AuthenticationFailed("invalid national id or password".to_string());

    let user = match user_repo.find_by_national_id(&payload.national_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(national_id = %payload.national_id, "Login attempt for unknown national id");
            return error_response(&invalid_credentials());
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return error_response(&invalid_credentials());
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return error_response(&AppError::Internal(
                "an error occurred during login".to_string(),
            ));
        }
    }

    let access_token = match state.jwt_service.generate_access_token(&user.national_id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return error_response(&AppError::Internal(
                "an error occurred during login".to_string(),
            ));
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    let response = LoginResponse {
        access_token,
        token_type: "bearer",
        user_name: user.name,
        user_id: user.id,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
