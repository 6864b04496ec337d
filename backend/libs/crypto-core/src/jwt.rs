//! Signed identity tokens for the catalog services
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 using a single shared
//! secret. They carry exactly three claims:
//!
//! - `user_id`: subject identifier (integer)
//! - `iat`: issued-at (Unix seconds)
//! - `exp`: expiry (Unix seconds)
//!
//! ## Security Design
//!
//! - **HS256 ONLY**: tokens announcing any other algorithm are rejected
//! - **No hardcoded keys**: the secret is handed in by the caller (configuration)
//! - **Stateless**: nothing is stored server-side, tokens live until `exp`
//! - **Immutable**: a `TokenCodec` never changes after construction and is
//!   shared freely between concurrent calls
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use crypto_core::jwt::TokenCodec;
//!
//! let codec = TokenCodec::new("change-me");
//! let token = codec.issue(42, Utc::now(), Duration::hours(12)).unwrap();
//! assert_eq!(codec.parse(&token).unwrap(), 42);
//! ```
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// JWT algorithm - MUST be HS256 (fixed-secret deployment)
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Numeric identifier of an authenticated user
pub type SubjectId = u32;

// ============================================================================
// Data Structures
// ============================================================================

/// Claims written into every issued token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier
    pub user_id: SubjectId,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims as they arrive on the wire, before shape checks.
///
/// Tokens minted by other implementations encode numbers as floats, so the
/// numeric claims are read loosely and narrowed afterwards.
#[derive(Debug, Deserialize)]
struct UncheckedClaims {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    exp: Option<Value>,
}

/// Why a token was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("user_id claim is missing or not an integer")]
    MalformedClaims,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

// ============================================================================
// Codec
// ============================================================================

/// Issues and validates HS256 identity tokens with one process-wide secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &JWT_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Build a codec around a shared secret
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Signature only; expiry and claim shape are checked by hand so the
        // failure kinds stay distinguishable and `exp == now` counts as expired.
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `subject` valid from `now` for `ttl`
    pub fn issue(
        &self,
        subject: SubjectId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let exp = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            user_id: subject,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token against the current time and return its subject
    pub fn parse(&self, token: &str) -> Result<SubjectId, TokenError> {
        self.parse_at(token, Utc::now()).map_err(|e| {
            debug!(error = %e, "Token rejected");
            e
        })
    }

    /// Validate a token as of `now` and return its subject
    ///
    /// Checks run in order: structure, signature, expiry, subject claim.
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<SubjectId, TokenError> {
        let data = decode::<UncheckedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let exp = data
            .claims
            .exp
            .as_ref()
            .and_then(as_unix_seconds)
            .ok_or_else(|| TokenError::Malformed("exp claim is missing".to_string()))?;

        if exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        data.claims
            .user_id
            .as_ref()
            .and_then(as_subject)
            .ok_or(TokenError::MalformedClaims)
    }
}

fn as_unix_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
}

fn as_subject(value: &Value) -> Option<SubjectId> {
    if let Some(n) = value.as_u64() {
        return SubjectId::try_from(n).ok();
    }

    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(SubjectId::MAX))
        .map(|f| f as SubjectId)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    const TEST_SECRET: &str = "TEST_SECRET_KEY";

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    /// Sign arbitrary claims, the way a foreign issuer would
    fn sign_raw(claims: &Value, secret: &str, alg: Algorithm) -> String {
        encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("signing should succeed")
    }

    #[test]
    fn test_issue_produces_three_part_token() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec
            .issue(7, fixed_now(), Duration::hours(12))
            .expect("issue should succeed");

        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn test_round_trip_before_expiry() {
        let codec = TokenCodec::new(TEST_SECRET);
        let now = fixed_now();

        for subject in [0, 1, 42, SubjectId::MAX] {
            let token = codec
                .issue(subject, now, Duration::seconds(90))
                .expect("issue should succeed");

            assert_eq!(codec.parse_at(&token, now).unwrap(), subject);
            assert_eq!(
                codec
                    .parse_at(&token, now + Duration::seconds(89))
                    .unwrap(),
                subject
            );
        }
    }

    #[test]
    fn test_parse_uses_current_time() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec
            .issue(42, Utc::now(), Duration::hours(1))
            .expect("issue should succeed");

        assert_eq!(codec.parse(&token).unwrap(), 42);
    }

    #[test]
    fn test_zero_and_negative_ttl_are_expired() {
        let codec = TokenCodec::new(TEST_SECRET);
        let now = fixed_now();

        for ttl in [Duration::zero(), Duration::seconds(-1), Duration::days(-3)] {
            let token = codec.issue(5, now, ttl).expect("issue should succeed");
            assert_eq!(codec.parse_at(&token, now), Err(TokenError::Expired));
        }
    }

    #[test]
    fn test_ttl_past_max_date_is_an_error() {
        let codec = TokenCodec::new(TEST_SECRET);

        let err = codec
            .issue(1, Utc::now(), Duration::seconds(10_000_000_000_000))
            .unwrap_err();
        assert_eq!(err, TokenError::ExpiryOutOfRange);

        let err = codec
            .issue(1, DateTime::<Utc>::MAX_UTC, Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err, TokenError::ExpiryOutOfRange);
    }

    #[test]
    fn test_expired_after_ttl_elapses() {
        let codec = TokenCodec::new(TEST_SECRET);
        let now = fixed_now();
        let token = codec
            .issue(5, now, Duration::minutes(10))
            .expect("issue should succeed");

        assert_eq!(
            codec.parse_at(&token, now + Duration::minutes(10)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.parse_at(&token, now + Duration::days(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let issuer = TokenCodec::new("WRONG_KEY");
        let codec = TokenCodec::new(TEST_SECRET);
        let token = issuer
            .issue(1, fixed_now(), Duration::hours(1))
            .expect("issue should succeed");

        assert_eq!(
            codec.parse_at(&token, fixed_now()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let issuer = TokenCodec::new("WRONG_KEY");
        let codec = TokenCodec::new(TEST_SECRET);
        let token = issuer
            .issue(1, fixed_now(), Duration::seconds(-60))
            .expect("issue should succeed");

        assert_eq!(
            codec.parse_at(&token, fixed_now()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let codec = TokenCodec::new(TEST_SECRET);
        let now = fixed_now();
        let token = codec
            .issue(1, now, Duration::hours(1))
            .expect("issue should succeed");

        // Swap in a payload claiming a different subject, keep the old signature
        let forged_payload = {
            let other = codec
                .issue(999, now, Duration::hours(1))
                .expect("issue should succeed");
            other.split('.').nth(1).unwrap().to_string()
        };
        let parts: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            codec.parse_at(&tampered, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);
        let exp = fixed_now().timestamp() + 3600;
        let token = sign_raw(
            &json!({ "user_id": 1, "exp": exp }),
            TEST_SECRET,
            Algorithm::HS512,
        );

        assert_eq!(
            codec.parse_at(&token, fixed_now()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_missing_subject_claim() {
        let codec = TokenCodec::new(TEST_SECRET);
        let exp = fixed_now().timestamp() + 3600;
        let token = sign_raw(&json!({ "exp": exp }), TEST_SECRET, Algorithm::HS256);

        assert_eq!(
            codec.parse_at(&token, fixed_now()),
            Err(TokenError::MalformedClaims)
        );
    }

    #[test]
    fn test_non_integer_subject_claim() {
        let codec = TokenCodec::new(TEST_SECRET);
        let exp = fixed_now().timestamp() + 3600;

        for subject in [json!("42"), json!(4.5), json!(-1), json!(null), json!(u64::MAX)] {
            let token = sign_raw(
                &json!({ "user_id": subject, "exp": exp }),
                TEST_SECRET,
                Algorithm::HS256,
            );
            assert_eq!(
                codec.parse_at(&token, fixed_now()),
                Err(TokenError::MalformedClaims),
                "subject {subject} should be refused"
            );
        }
    }

    #[test]
    fn test_float_encoded_claims_are_accepted() {
        let codec = TokenCodec::new(TEST_SECRET);
        let exp = (fixed_now().timestamp() + 3600) as f64;
        let token = sign_raw(
            &json!({ "user_id": 42.0, "exp": exp, "iat": 0.0 }),
            TEST_SECRET,
            Algorithm::HS256,
        );

        assert_eq!(codec.parse_at(&token, fixed_now()).unwrap(), 42);
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = sign_raw(&json!({ "user_id": 1 }), TEST_SECRET, Algorithm::HS256);

        assert!(matches!(
            codec.parse_at(&token, fixed_now()),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(TEST_SECRET);

        for token in ["", "badtoken", "invalid.token.here"] {
            assert!(
                matches!(
                    codec.parse_at(token, fixed_now()),
                    Err(TokenError::Malformed(_))
                ),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let codec = TokenCodec::new(TEST_SECRET);
        let rendered = format!("{codec:?}");

        assert!(!rendered.contains(TEST_SECRET));
        assert!(rendered.contains("HS256"));
    }
}
