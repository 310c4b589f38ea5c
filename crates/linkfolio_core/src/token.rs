//! crates/linkfolio_core/src/token.rs
//!
//! The bearer token codec.
//!
//! A token is the base64 encoding of `"{user_id}:{email}:{millis}:{nonce}"`
//! where `nonce` is 32 cryptographically random bytes, hex-encoded. The token
//! carries no signature: it is only trusted when it exactly matches the copy
//! stored for the user, so it behaves as a revocable capability rather than a
//! self-validating credential.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use uuid::Uuid;

/// Random bytes folded into every issued token.
pub const NONCE_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed bearer token")]
    Malformed,
}

/// Issues a fresh opaque token binding the user id, email, and issue time to
/// a random nonce.
pub fn issue(user_id: Uuid, email: &str) -> String {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    let raw = format!(
        "{}:{}:{}:{}",
        user_id,
        email,
        Utc::now().timestamp_millis(),
        hex::encode(nonce)
    );
    BASE64.encode(raw)
}

/// Recovers the `(user_id, email)` pair from a token.
///
/// The nonce and issue time are not validated here; they exist to make the
/// stored string unguessable. Anything that does not decode into exactly the
/// four expected fields is malformed.
pub fn decode(token: &str) -> Result<(Uuid, String), TokenError> {
    let raw = BASE64.decode(token).map_err(|_| TokenError::Malformed)?;
    let raw = String::from_utf8(raw).map_err(|_| TokenError::Malformed)?;
    let fields: Vec<&str> = raw.split(':').collect();
    match fields.as_slice() {
        [user_id, email, _issued_at, _nonce] => {
            let user_id = Uuid::parse_str(user_id).map_err(|_| TokenError::Malformed)?;
            Ok((user_id, (*email).to_string()))
        }
        _ => Err(TokenError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_the_same_identity() {
        let user_id = Uuid::new_v4();
        let token = issue(user_id, "alice@example.com");

        let (decoded_id, decoded_email) = decode(&token).unwrap();
        assert_eq!(decoded_id, user_id);
        assert_eq!(decoded_email, "alice@example.com");
    }

    #[test]
    fn every_issue_produces_a_distinct_token() {
        let user_id = Uuid::new_v4();
        let first = issue(user_id, "alice@example.com");
        let second = issue(user_id, "alice@example.com");
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_strings_that_are_not_base64() {
        assert_eq!(decode("%%% not base64 %%%"), Err(TokenError::Malformed));
    }

    #[test]
    fn rejects_payloads_with_the_wrong_field_count() {
        let three_fields = BASE64.encode("a:b:c");
        assert_eq!(decode(&three_fields), Err(TokenError::Malformed));

        let five_fields = BASE64.encode("a:b:c:d:e");
        assert_eq!(decode(&five_fields), Err(TokenError::Malformed));
    }

    #[test]
    fn rejects_payloads_with_an_invalid_user_id() {
        let bad_id = BASE64.encode("not-a-uuid:alice@example.com:0:ff");
        assert_eq!(decode(&bad_id), Err(TokenError::Malformed));
    }
}
