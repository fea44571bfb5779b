// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and logout endpoints.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{config::AUTH_COOKIE, error::ApiError, state::AppState};

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Authenticated email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Session token, also set as the `auth_token` cookie.
    pub token: String,
}

/// Log in with email and password.
///
/// Invalid email and invalid password produce the identical response, so
/// the endpoint cannot be used to enumerate registered emails. A store
/// outage is reported as 503, never as bad credentials.
#[utoipa::path(
    post,
    path = "/v1/session",
    tag = "Session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Credential store unavailable")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let verified = state
        .verifier
        .verify(&request.email, &request.password)
        .map_err(|e| {
            tracing::error!("credential store failure during login: {e}");
            ApiError::service_unavailable("Unable to verify credentials")
        })?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let token = state.tokens.issue(&verified.email).map_err(|e| {
        tracing::error!("token issuance failed: {e}");
        ApiError::service_unavailable("Unable to start session")
    })?;

    tracing::info!(email = %verified.email, "login succeeded");

    let cookie = format!("{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse {
            email: verified.email,
            name: verified.name,
            token,
        }),
    ))
}

/// Log out by clearing the session cookie.
///
/// Purely client-side: the token itself stays valid until its expiry, since
/// there is no server-side revocation list.
#[utoipa::path(
    delete,
    path = "/v1/session",
    tag = "Session",
    responses(
        (status = 204, description = "Cookie cleared")
    )
)]
pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{AUTH_COOKIE}=; Max-Age=0; HttpOnly; SameSite=Lax; Path=/");
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, cookie)]),
    )
}
