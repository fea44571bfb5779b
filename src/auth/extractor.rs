// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor gating protected handlers on a valid session token.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The token is taken from the `auth_token` cookie (browser clients) or the
//! `Authorization: Bearer` header (API clients). A handler that takes
//! `Auth` cannot run without a prior successful validation.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use super::{AuthenticatedUser, AuthError};
use crate::config::AUTH_COOKIE;
use crate::state::AppState;

/// Extractor binding the authenticated identity into the request.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A previous gate pass on this request already bound the identity
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = token_from_parts(parts).ok_or(AuthError::MissingCredential)?;

        let email = state
            .tokens
            .validate(&token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user = AuthenticatedUser { email };
        parts.extensions.insert(user.clone());
        Ok(Auth(user))
    }
}

/// Pull the session token from the cookie or the bearer header.
fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(token) = cookie_value(parts, AUTH_COOKIE) {
        return Some(token);
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Find a cookie by name across all Cookie headers.
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    for header in parts.headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
