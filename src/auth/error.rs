// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The variants exist for server-side logging; the HTTP response is the
//! same 401 body whether the token was absent, expired, malformed, or
//! tampered with. Distinguishing those externally would hand an attacker a
//! validation oracle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication failure for a gated request.
#[derive(Debug)]
pub enum AuthError {
    /// No session token on the request (no cookie, no bearer header).
    MissingCredential,
    /// The token did not validate (any reason).
    InvalidToken,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "No session token on request"),
            AuthError::InvalidToken => write!(f, "Session token failed validation"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("authentication rejected: {self}");

        // Uniform body for every failure mode
        let body = Json(AuthErrorBody {
            error: "Authentication required".to_string(),
            error_code: "unauthenticated".to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn every_variant_returns_identical_401() {
        let mut bodies = Vec::new();
        for err in [AuthError::MissingCredential, AuthError::InvalidToken] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            bodies.push(bytes);
        }
        assert_eq!(bodies[0], bodies[1]);

        let body: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
        assert_eq!(body["error_code"], "unauthenticated");
    }
}
