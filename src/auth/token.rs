// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and validation (HS256 JWT).
//!
//! Tokens are stateless: there is no server-side session table and no
//! revocation list. `validate` checks signature and expiry in one step and
//! collapses every failure into a single undifferentiated error, so callers
//! cannot learn which check failed.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token signing failed. Startup/configuration problem, not an input
    /// problem.
    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The token is not acceptable. Covers structural corruption,
    /// signature mismatch, and expiry alike.
    #[error("invalid session token")]
    Invalid,
}

/// Issues and validates session tokens with a process-wide symmetric secret.
///
/// The secret is injected at construction (not read from a module-level
/// constant) so tests can run with distinct secrets. Rotating the secret
/// invalidates all outstanding tokens instantly.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a token for `email`, valid from now until now + ttl.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Validate a token and return its subject email.
    ///
    /// Signature and expiry are verified together, with zero clock leeway:
    /// a token is accepted only while `now < exp`.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Claims carry no audience
        validation.validate_aud = false;

        let data = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-not-for-production";

    #[test]
    fn issued_token_validates_immediately() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("alice@example.com").unwrap();
        assert_eq!(service.validate(&token).unwrap(), "alice@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        // ttl in the past: exp < now at validation time
        let service = TokenService::new(SECRET, -120);
        let token = service.issue("alice@example.com").unwrap();
        assert!(matches!(service.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = TokenService::new(b"one-secret", 3600);
        let verifier = TokenService::new(b"another-secret", 3600);
        let token = issuer.issue("alice@example.com").unwrap();
        assert!(matches!(verifier.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("alice@example.com").unwrap();

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        parts[1] = {
            let mut payload = parts[1].clone().into_bytes();
            payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
            String::from_utf8(payload).unwrap()
        };
        let tampered = parts.join(".");

        assert!(matches!(
            service.validate(&tampered),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(SECRET, 3600);
        assert!(matches!(
            service.validate("not-a-jwt"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(service.validate(""), Err(TokenError::Invalid)));
    }
}
