//! Access/refresh token pair and expiry-claim decoding.
//!
//! The access token is treated as an opaque three-segment compact token.
//! The only claim this crate ever reads is `exp` from the middle segment,
//! and it is read optimistically: no signature verification is performed,
//! the server remains the sole authority on token validity.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// The credential pair issued by login and refresh exchanges.
///
/// Either both tokens are present or the pair does not exist at all;
/// absence of a pair means logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived credential presented on each authenticated request.
    pub access_token: String,
    /// Longer-lived credential exchanged for a new pair near expiry.
    pub refresh_token: String,
    /// Token scheme, usually "Bearer".
    pub token_type: String,
    /// Server-reported lifetime of the access token, in seconds.
    pub expires_in: u64,
}

impl TokenPair {
    /// Creates a validated pair. Both tokens must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTokenPair`] if either token is empty.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: u64,
    ) -> DomainResult<Self> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        if access_token.is_empty() || refresh_token.is_empty() {
            return Err(DomainError::InvalidTokenPair(
                "access and refresh tokens must both be present".to_string(),
            ));
        }
        Ok(Self {
            access_token,
            refresh_token,
            token_type: token_type.into(),
            expires_in,
        })
    }

    /// Returns the `Authorization` header value for this pair.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Decodes the `exp` claim (seconds since epoch, UTC) of the access token.
    ///
    /// Returns `None` when the claim cannot be determined; expiry checks
    /// treat that conservatively as already expired.
    #[must_use]
    pub fn access_exp(&self) -> Option<i64> {
        decode_access_exp(&self.access_token)
    }
}

/// Decodes the `exp` claim from a compact three-segment access token.
///
/// Any malformation (wrong segment count, bad base64url, non-JSON payload,
/// missing or non-integer `exp`) yields `None`.
#[must_use]
pub fn decode_access_exp(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let decoded = decode_base64url(payload)?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    claims.get("exp")?.as_i64()
}

/// Decodes base64url content with or without padding.
fn decode_base64url(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_token(payload: &str) -> String {
        let encode =
            |s: &str| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s.as_bytes());
        format!("{}.{}.sig", encode("{\"alg\":\"HS256\"}"), encode(payload))
    }

    #[test]
    fn test_decode_exp_claim() {
        let token = make_token("{\"sub\":\"user-1\",\"exp\":1893456000}");
        assert_eq!(decode_access_exp(&token), Some(1_893_456_000));
    }

    #[test]
    fn test_decode_exp_missing_claim() {
        let token = make_token("{\"sub\":\"user-1\"}");
        assert_eq!(decode_access_exp(&token), None);
    }

    #[test]
    fn test_decode_exp_non_integer_claim() {
        let token = make_token("{\"exp\":\"tomorrow\"}");
        assert_eq!(decode_access_exp(&token), None);
    }

    #[test]
    fn test_decode_exp_malformed_structure() {
        assert_eq!(decode_access_exp("not-a-jwt"), None);
        assert_eq!(decode_access_exp(""), None);
        assert_eq!(decode_access_exp("a.%%%.c"), None);
    }

    #[test]
    fn test_decode_exp_non_json_payload() {
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(b"plain text");
        let token = format!("h.{payload}.s");
        assert_eq!(decode_access_exp(&token), None);
    }

    #[test]
    fn test_token_pair_requires_both_tokens() {
        assert!(TokenPair::new("access", "refresh", "Bearer", 900).is_ok());
        assert!(TokenPair::new("", "refresh", "Bearer", 900).is_err());
        assert!(TokenPair::new("access", "", "Bearer", 900).is_err());
    }

    #[test]
    fn test_token_pair_serde_round_trip() {
        let pair = TokenPair::new("acc", "ref", "Bearer", 900).unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert!(json.contains("\"access_token\":\"acc\""));
        assert!(json.contains("\"expires_in\":900"));
        let back: TokenPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }

    #[test]
    fn test_authorization_header() {
        let pair = TokenPair::new("acc", "ref", "Bearer", 900).unwrap();
        assert_eq!(pair.authorization_header(), "Bearer acc");
    }
}
