//! crates/linkfolio_core/src/ports.rs
//!
//! Defines the service contract (trait) for the persistence boundary and the
//! error taxonomy shared by every core operation. The trait forms the edge of
//! the hexagonal architecture, keeping the core independent of the concrete
//! database.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AnalyticsEvent, AuthIdentity, NewLink, Profile, UserCredentials};

//=========================================================================================
// Error Taxonomy
//=========================================================================================

/// Why a bearer credential was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("missing bearer token")]
    MissingCredential,
    #[error("malformed bearer token")]
    MalformedToken,
    #[error("invalid credentials")]
    InvalidCredential,
}

/// The error taxonomy for all core operations. Every public operation maps
/// onto exactly one of these kinds; internal detail stays behind `Storage`
/// and is logged at the service boundary rather than exposed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness violation, naming the colliding field.
    #[error("{0} is already taken")]
    DuplicateField(String),

    /// Missing, malformed, or mismatched credential.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[from] AuthFailure),

    /// An onboarding step name outside the closed step set.
    #[error("unknown onboarding step '{0}'")]
    UnknownStep(String),

    /// A lookup miss.
    #[error("{0} not found")]
    NotFound(String),

    /// The storage backend did not respond in time.
    #[error("storage operation timed out")]
    Timeout,

    /// The storage backend is unavailable or a statement failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

//=========================================================================================
// Store Port (Trait)
//=========================================================================================

#[async_trait]
pub trait ProfileStore: Send + Sync {
    // --- Credential Store ---

    /// Single probe for a username/email collision. Reports `"username"`
    /// when both fields collide.
    async fn find_conflict(&self, username: &str, email: &str) -> CoreResult<Option<String>>;

    async fn create_user(&self, username: &str, email: &str) -> CoreResult<Uuid>;

    /// Overwrites the user's single active token. Reissue is revocation.
    async fn store_auth_token(&self, user_id: Uuid, token: &str) -> CoreResult<()>;

    /// Resolves an identity only when the stored token matches the presented
    /// one exactly.
    async fn identity_by_token(&self, user_id: Uuid, token: &str)
        -> CoreResult<Option<AuthIdentity>>;

    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<UserCredentials>>;

    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> CoreResult<()>;

    async fn set_industry(&self, user_id: Uuid, industry: &str) -> CoreResult<()>;

    async fn set_profile_info(&self, user_id: Uuid, full_name: &str, bio: &str)
        -> CoreResult<()>;

    async fn set_theme(&self, user_id: Uuid, theme: &str) -> CoreResult<()>;

    /// Sets the completed flag and stamps the completion time on first
    /// completion only; later calls are no-ops.
    async fn mark_onboarding_complete(&self, user_id: Uuid) -> CoreResult<()>;

    // --- Link Store ---

    /// Replaces the user's entire link set atomically, preserving submission
    /// order. Readers never observe a mix of old and new links.
    async fn replace_links(&self, user_id: Uuid, links: &[NewLink]) -> CoreResult<()>;

    // --- Profile Read Path ---

    /// Case-sensitive exact-match lookup, links in insertion order.
    async fn profile_by_username(&self, username: &str) -> CoreResult<Option<Profile>>;

    // --- Analytics ---

    async fn insert_event(&self, event: &AnalyticsEvent) -> CoreResult<()>;
}
