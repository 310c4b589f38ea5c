//! crates/linkfolio_core/src/auth.rs
//!
//! The auth guard: resolves a presented bearer token to an identity by exact
//! match against the server-stored copy.

use crate::domain::AuthIdentity;
use crate::ports::{AuthFailure, CoreResult, ProfileStore};
use crate::token;

/// Validates a presented bearer token and resolves the caller's identity.
///
/// Stateless and re-entrant: every protected operation calls this
/// independently; there is no session cache. A missing token, an undecodable
/// token, and a token that does not match the stored value each map to their
/// own [`AuthFailure`].
pub async fn authenticate(
    store: &dyn ProfileStore,
    bearer: Option<&str>,
) -> CoreResult<AuthIdentity> {
    let presented = bearer.ok_or(AuthFailure::MissingCredential)?;
    let (user_id, _) = token::decode(presented).map_err(|_| AuthFailure::MalformedToken)?;

    // The decoded fields only locate the row; the stored token string itself
    // is the credential. A reissued or revoked token fails the comparison.
    let identity = store
        .identity_by_token(user_id, presented)
        .await?
        .ok_or(AuthFailure::InvalidCredential)?;
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CoreError;
    use crate::testing::MemStore;
    use uuid::Uuid;

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let store = MemStore::new();
        let err = authenticate(&store, None).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::AuthenticationFailed(AuthFailure::MissingCredential)
        ));
    }

    #[tokio::test]
    async fn undecodable_token_is_rejected() {
        let store = MemStore::new();
        let err = authenticate(&store, Some("definitely not a token"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::AuthenticationFailed(AuthFailure::MalformedToken)
        ));
    }

    #[tokio::test]
    async fn well_formed_but_unknown_token_is_rejected() {
        let store = MemStore::new();
        let stray = token::issue(Uuid::new_v4(), "ghost@example.com");
        let err = authenticate(&store, Some(&stray)).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::AuthenticationFailed(AuthFailure::InvalidCredential)
        ));
    }
}
