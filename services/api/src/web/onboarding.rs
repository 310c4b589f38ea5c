//! services/api/src/web/onboarding.rs
//!
//! The onboarding step endpoint. One route serves the whole workflow; the
//! core state machine decides per step whether the bearer token is required.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::auth::bearer_token;
use crate::web::state::AppState;
use linkfolio_core::onboarding::{self, OnboardingStep};

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// One onboarding step submission: a step name plus its payload.
#[derive(Deserialize, ToSchema)]
pub struct OnboardingRequest {
    pub step: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Value,
}

#[derive(Serialize, ToSchema)]
pub struct OnboardingResponse {
    pub success: bool,
    pub message: String,
    /// Present only on `account_setup`.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Present only on `account_setup`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/onboarding - Run one step of the provisioning workflow.
///
/// `account_setup` is open; every other step needs an
/// `Authorization: Bearer <token>` header carrying the token returned by
/// `account_setup` or login.
#[utoipa::path(
    post,
    path = "/api/onboarding",
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Step applied", body = OnboardingResponse),
        (status = 400, description = "Unknown step or invalid payload"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn onboarding_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, ApiError> {
    let step = OnboardingStep::parse(&req.step, req.data)?;
    let outcome =
        onboarding::apply_step(state.store.as_ref(), bearer_token(&headers), step).await?;

    Ok(Json(OnboardingResponse {
        success: true,
        message: outcome.message.to_string(),
        user_id: outcome.user_id,
        token: outcome.token,
    }))
}
