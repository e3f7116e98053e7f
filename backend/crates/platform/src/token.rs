//! Signed Bearer Tokens
//!
//! HS256 JSON Web Tokens over caller-defined claim types, plus extraction of
//! `Authorization: Bearer` credentials. Expiry (`exp`) is always required and
//! validated without leeway.

use axum::http::{HeaderMap, header};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Token signing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token secret must be at least {MIN_SECRET_LENGTH} bytes")]
    WeakSecret,
}

/// Signs and verifies tokens with one shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Encode claims into a compact token string
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        iat: i64,
        exp: i64,
        name: String,
    }

    fn claims(exp_offset_secs: i64) -> TestClaims {
        let now = chrono::Utc::now().timestamp();
        TestClaims {
            sub: "user-1".to_string(),
            iat: now,
            exp: now + exp_offset_secs,
            name: "Ada".to_string(),
        }
    }

    fn signer() -> TokenSigner {
        TokenSigner::new(&[7u8; 32]).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let original = claims(300);
        let token = signer.sign(&original).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = signer.verify(&token).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let token = signer.sign(&claims(-10)).unwrap();
        let result = signer.verify::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_wrong_secret() {
        let token = signer().sign(&claims(300)).unwrap();
        let other = TokenSigner::new(&[8u8; 32]).unwrap();
        assert!(matches!(
            other.verify::<TestClaims>(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_token() {
        let signer = signer();
        let token = signer.sign(&claims(300)).unwrap();
        let tampered = format!("{}x", token);
        assert!(signer.verify::<TestClaims>(&tampered).is_err());
        assert!(signer.verify::<TestClaims>("garbage").is_err());
    }

    #[test]
    fn test_weak_secret_rejected() {
        assert_eq!(
            TokenSigner::new(b"short").unwrap_err(),
            TokenError::WeakSecret
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(extract_bearer_token(&headers), Some("xyz".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
