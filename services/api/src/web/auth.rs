//! services/api/src/web/auth.rs
//!
//! The login endpoint and the bearer token carrier helper.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::state::AppState;
use linkfolio_core::{password, token, AuthFailure, CoreError};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: LoginUser,
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/login - Exchange email and password for a fresh bearer
/// token. The token is reissued wholesale; any previously issued token for
/// the account stops working.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // 1. Validate input
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(CoreError::Validation("Email and password are required".to_string()).into());
    }

    // 2. Look up stored credentials
    let creds = state
        .store
        .credentials_by_email(&req.email)
        .await?
        .ok_or(CoreError::AuthenticationFailed(AuthFailure::InvalidCredential))?;

    // 3. Verify the password (accounts that never set one cannot log in)
    let stored_hash = creds
        .password_hash
        .as_deref()
        .ok_or(CoreError::AuthenticationFailed(AuthFailure::InvalidCredential))?;
    let valid = password::verify_password(&req.password, stored_hash).map_err(ApiError::Internal)?;
    if !valid {
        return Err(CoreError::AuthenticationFailed(AuthFailure::InvalidCredential).into());
    }

    // 4. Reissue the bearer token and persist it
    let token = token::issue(creds.user_id, &creds.email);
    state.store.store_auth_token(creds.user_id, &token).await?;

    Ok(Json(LoginResponse {
        success: true,
        user: LoginUser {
            id: creds.user_id,
            email: creds.email,
            username: creds.username,
        },
        token,
    }))
}

/// Pulls the bearer token out of the `Authorization` header, if present.
/// Callers never parse the token themselves; it goes to the auth guard as an
/// opaque string.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
