// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{auth::Auth, error::ApiError, state::AppState};

/// Transfer request body.
///
/// `amount` is an integer in the smallest currency unit; non-integer JSON
/// amounts are rejected during deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Source account id, must be owned by the caller.
    pub from: String,
    /// Target account id, any existing account.
    pub to: String,
    /// Amount to move.
    pub amount: i64,
}

/// Successful transfer response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponse {
    pub from: String,
    pub to: String,
    pub amount: i64,
}

/// Transfer funds from one of the caller's accounts to another account.
///
/// The debit and credit commit together or not at all. Retrying a completed
/// transfer executes it again; there is no idempotency key.
#[utoipa::path(
    post,
    path = "/v1/transfers",
    tag = "Transfers",
    request_body = TransferRequest,
    security(("session" = [])),
    responses(
        (status = 200, description = "Transfer applied", body = TransferResponse),
        (status = 400, description = "Invalid amount, missing target, or insufficient funds"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Source account not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn create_transfer(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    state
        .bank
        .transfer(&request.from, &request.to, request.amount, &user.email)?;

    tracing::info!(
        from = %request.from,
        to = %request.to,
        amount = request.amount,
        owner = %user.email,
        "transfer applied"
    );

    Ok(Json(TransferResponse {
        from: request.from,
        to: request.to,
        amount: request.amount,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::models::AccountRecord;
    use crate::store::BankDatabase;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn seeded_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let db = Arc::new(BankDatabase::open(&dir.path().join("bank.redb")).expect("open db"));
        for (id, owner, balance) in [
            ("A1", "alice@example.com", 500),
            ("A2", "bob@example.com", 500),
        ] {
            db.insert_account(&AccountRecord {
                id: id.to_string(),
                owner: owner.to_string(),
                balance,
            })
            .unwrap();
        }
        let state = AppState::new(db, b"transfers-test-secret", 1_000).expect("state");
        (state, dir)
    }

    fn alice() -> Auth {
        Auth(AuthenticatedUser {
            email: "alice@example.com".to_string(),
        })
    }

    fn request(from: &str, to: &str, amount: i64) -> Json<TransferRequest> {
        Json(TransferRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        })
    }

    #[tokio::test]
    async fn transfer_moves_funds() {
        let (state, _dir) = seeded_state();

        let Json(response) = create_transfer(alice(), State(state.clone()), request("A1", "A2", 200))
            .await
            .unwrap();
        assert_eq!(response.amount, 200);

        assert_eq!(state.bank.balance_of("A1", "alice@example.com").unwrap(), 300);
        assert_eq!(state.bank.balance_of("A2", "bob@example.com").unwrap(), 700);
    }

    #[tokio::test]
    async fn failures_map_to_expected_statuses() {
        let (state, _dir) = seeded_state();

        // Missing target
        let err = create_transfer(alice(), State(state.clone()), request("A1", "A9", 100))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        // Negative amount
        let err = create_transfer(alice(), State(state.clone()), request("A1", "A2", -5))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        // Foreign source
        let err = create_transfer(alice(), State(state.clone()), request("A2", "A1", 100))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        // Insufficient funds
        let err = create_transfer(alice(), State(state.clone()), request("A1", "A2", 600))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        // Nothing moved
        assert_eq!(state.bank.balance_of("A1", "alice@example.com").unwrap(), 500);
        assert_eq!(state.bank.balance_of("A2", "bob@example.com").unwrap(), 500);
    }
}
