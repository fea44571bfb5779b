// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and the authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated user's email.
    pub sub: String,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

/// The authenticated identity bound to one request.
///
/// Produced by the `Auth` extractor after token validation and passed
/// explicitly into every protected operation; there is no ambient
/// current-user state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user's email, as carried in the token's `sub` claim.
    pub email: String,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self { email: claims.sub }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_from_claims_takes_subject() {
        let claims = SessionClaims {
            sub: "alice@example.com".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let user = AuthenticatedUser::from(claims);
        assert_eq!(user.email, "alice@example.com");
    }
}
