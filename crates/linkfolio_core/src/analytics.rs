//! crates/linkfolio_core/src/analytics.rs
//!
//! Validation and recording of visitor interaction events.

use uuid::Uuid;

use crate::domain::{AnalyticsEvent, EventType, LinkData};
use crate::ports::{CoreError, CoreResult, ProfileStore};

/// An event as submitted from a visitor's browser. Everything is optional at
/// the boundary; [`record`] enforces the required fields.
#[derive(Debug, Clone, Default)]
pub struct EventSubmission {
    pub profile_username: Option<String>,
    pub visitor_id: Option<String>,
    pub session_id: Option<String>,
    pub event_type: Option<String>,
    pub link_data: Option<LinkData>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
}

/// Validates and persists one event, assigning it a fresh id.
///
/// The target username is deliberately not checked against the users table:
/// ingestion must never block on profile existence. There is also no
/// deduplication; a resubmitted event is a second row.
pub async fn record(store: &dyn ProfileStore, submission: EventSubmission) -> CoreResult<Uuid> {
    let profile_username = require(submission.profile_username, "profileUsername")?;
    let session_id = require(submission.session_id, "sessionId")?;
    let event_type = require(submission.event_type, "eventType")?;
    let event_type = EventType::parse(&event_type)
        .ok_or_else(|| CoreError::Validation(format!("unknown eventType '{event_type}'")))?;

    let event = AnalyticsEvent {
        id: Uuid::new_v4(),
        profile_username,
        visitor_id: submission.visitor_id,
        session_id,
        event_type,
        link_data: submission.link_data,
        referrer: submission.referrer,
        user_agent: submission.user_agent,
        country: submission.country,
        city: submission.city,
        device: submission.device,
        browser: submission.browser,
    };
    store.insert_event(&event).await?;
    Ok(event.id)
}

fn require(value: Option<String>, field: &str) -> CoreResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemStore;

    fn page_view(profile: &str) -> EventSubmission {
        EventSubmission {
            profile_username: Some(profile.to_string()),
            session_id: Some("s1".to_string()),
            event_type: Some("page_view".to_string()),
            ..EventSubmission::default()
        }
    }

    #[tokio::test]
    async fn valid_event_is_stored_exactly_once() {
        let store = MemStore::new();
        let id = record(&store, page_view("alice")).await.unwrap();

        let events = store.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].profile_username, "alice");
        assert_eq!(events[0].session_id, "s1");
        assert_eq!(events[0].event_type, EventType::PageView);
    }

    #[tokio::test]
    async fn missing_profile_username_stores_nothing() {
        let store = MemStore::new();
        let mut submission = page_view("alice");
        submission.profile_username = None;

        let err = record(&store, submission).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("profileUsername")));
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn missing_session_id_stores_nothing() {
        let store = MemStore::new();
        let mut submission = page_view("alice");
        submission.session_id = None;

        let err = record(&store, submission).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("sessionId")));
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_type_stores_nothing() {
        let store = MemStore::new();
        let mut submission = page_view("alice");
        submission.event_type = Some("hover".to_string());

        let err = record(&store, submission).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("hover")));
        assert!(store.events().is_empty());
    }

    #[tokio::test]
    async fn events_may_target_profiles_that_do_not_exist() {
        let store = MemStore::new();
        record(&store, page_view("nobody-here")).await.unwrap();
        assert_eq!(store.events().len(), 1);
    }

    #[tokio::test]
    async fn link_click_payload_is_preserved() {
        let store = MemStore::new();
        let submission = EventSubmission {
            event_type: Some("link_click".to_string()),
            link_data: Some(LinkData {
                platform: "github".to_string(),
                url: "https://github.com/alice".to_string(),
            }),
            ..page_view("alice")
        };
        record(&store, submission).await.unwrap();

        let events = store.events();
        assert_eq!(events[0].event_type, EventType::LinkClick);
        let link = events[0].link_data.as_ref().unwrap();
        assert_eq!(link.platform, "github");
        assert_eq!(link.url, "https://github.com/alice");
    }

    #[tokio::test]
    async fn duplicate_submissions_produce_duplicate_rows() {
        let store = MemStore::new();
        record(&store, page_view("alice")).await.unwrap();
        record(&store, page_view("alice")).await.unwrap();
        assert_eq!(store.events().len(), 2);
    }
}
