//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the public read/ingest endpoints and the
//! master definition for the OpenAPI specification.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ApiError;
use crate::web::state::AppState;
use linkfolio_core::analytics::{self, EventSubmission};
use linkfolio_core::{CoreError, LinkData};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::onboarding::onboarding_handler,
        get_profile_handler,
        record_event_handler,
    ),
    components(schemas(
        crate::web::auth::LoginRequest,
        crate::web::auth::LoginResponse,
        crate::web::auth::LoginUser,
        crate::web::onboarding::OnboardingRequest,
        crate::web::onboarding::OnboardingResponse,
        ProfileResponse,
        ProfileBody,
        SocialLinkBody,
        RecordEventRequest,
        LinkDataBody,
        RecordEventResponse,
    )),
    tags(
        (name = "LinkFolio API", description = "Link-in-bio profiles, onboarding, and analytics.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: ProfileBody,
}

#[derive(Serialize, ToSchema)]
pub struct ProfileBody {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub industry: String,
    pub theme: String,
    #[serde(rename = "socialLinks")]
    pub social_links: Vec<SocialLinkBody>,
}

#[derive(Serialize, ToSchema)]
pub struct SocialLinkBody {
    pub platform: String,
    pub url: String,
    #[serde(rename = "buttonText")]
    pub button_text: Option<String>,
}

/// A visitor interaction event. Only `profileUsername`, `sessionId`, and
/// `eventType` are required; unknown extra fields are ignored.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    pub profile_username: Option<String>,
    pub visitor_id: Option<String>,
    pub session_id: Option<String>,
    pub event_type: Option<String>,
    pub link_data: Option<LinkDataBody>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LinkDataBody {
    pub platform: String,
    pub url: String,
}

#[derive(Serialize, ToSchema)]
pub struct RecordEventResponse {
    pub success: bool,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// GET /api/profile/{username} - Public profile read.
///
/// Case-sensitive exact match. Safe to call unauthenticated; this is the
/// data the public page renders.
#[utoipa::path(
    get,
    path = "/api/profile/{username}",
    params(
        ("username" = String, Path, description = "Exact profile username")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .store
        .profile_by_username(&username)
        .await?
        .ok_or_else(|| CoreError::NotFound("Profile".to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        profile: ProfileBody {
            username: profile.username,
            name: profile.full_name.unwrap_or_default(),
            bio: profile.bio.unwrap_or_default(),
            industry: profile.industry.unwrap_or_default(),
            theme: profile
                .theme_preference
                .unwrap_or_else(|| "light".to_string()),
            social_links: profile
                .links
                .into_iter()
                .map(|link| SocialLinkBody {
                    platform: link.platform,
                    url: link.url,
                    button_text: link.button_text,
                })
                .collect(),
        },
    }))
}

/// POST /api/analytics - Record one visitor interaction event.
#[utoipa::path(
    post,
    path = "/api/analytics",
    request_body = RecordEventRequest,
    responses(
        (status = 200, description = "Event recorded", body = RecordEventResponse),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn record_event_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordEventRequest>,
) -> Result<Json<RecordEventResponse>, ApiError> {
    let submission = EventSubmission {
        profile_username: req.profile_username,
        visitor_id: req.visitor_id,
        session_id: req.session_id,
        event_type: req.event_type,
        link_data: req.link_data.map(|l| LinkData {
            platform: l.platform,
            url: l.url,
        }),
        referrer: req.referrer,
        user_agent: req.user_agent,
        country: req.country,
        city: req.city,
        device: req.device,
        browser: req.browser,
    };
    analytics::record(state.store.as_ref(), submission).await?;

    Ok(Json(RecordEventResponse { success: true }))
}
