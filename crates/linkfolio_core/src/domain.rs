//! crates/linkfolio_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! Only the projections the core actually operates on live here; the full
//! `users` row exists in the schema and the database adapter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity established by the auth guard for one request.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub user_id: Uuid,
    pub email: String,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
}

/// The public-facing aggregate served on profile reads.
#[derive(Debug, Clone)]
pub struct Profile {
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub industry: Option<String>,
    pub theme_preference: Option<String>,
    pub links: Vec<SocialLink>,
}

/// One outbound link on a profile, returned in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub button_text: Option<String>,
}

/// A link as submitted by the `links` onboarding step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub button_text: Option<String>,
}

/// Kind of visitor interaction recorded against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    PageView,
    LinkClick,
    Share,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "page_view",
            EventType::LinkClick => "link_click",
            EventType::Share => "share",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "page_view" => Some(EventType::PageView),
            "link_click" => Some(EventType::LinkClick),
            "share" => Some(EventType::Share),
            _ => None,
        }
    }
}

/// Structured payload attached to `link_click` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub platform: String,
    pub url: String,
}

/// One recorded visitor interaction. Append-only; never mutated.
#[derive(Debug, Clone)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub profile_username: String,
    pub visitor_id: Option<String>,
    pub session_id: String,
    pub event_type: EventType,
    pub link_data: Option<LinkData>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
}
