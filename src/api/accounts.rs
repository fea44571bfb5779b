// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account listing and balance endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::Auth, error::ApiError, state::AppState};

/// Response for GET /v1/accounts
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountsResponse {
    /// Owner email.
    pub email: String,
    /// Ids of the accounts owned by the caller.
    pub accounts: Vec<String>,
}

/// Response for GET /v1/accounts/{account_id}/balance
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Account id.
    pub account_id: String,
    /// Balance in the smallest currency unit.
    pub balance: i64,
}

/// List the authenticated user's accounts.
#[utoipa::path(
    get,
    path = "/v1/accounts",
    tag = "Accounts",
    security(("session" = [])),
    responses(
        (status = 200, description = "Account ids", body = AccountsResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_accounts(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<AccountsResponse>, ApiError> {
    let accounts = state.bank.accounts_of(&user.email).map_err(|e| {
        tracing::error!("store failure listing accounts: {e}");
        ApiError::service_unavailable("Service temporarily unavailable")
    })?;

    Ok(Json(AccountsResponse {
        email: user.email,
        accounts,
    }))
}

/// Get the balance of one of the authenticated user's accounts.
///
/// Accounts owned by other users return 404, exactly like accounts that do
/// not exist.
#[utoipa::path(
    get,
    path = "/v1/accounts/{account_id}/balance",
    tag = "Accounts",
    params(
        ("account_id" = String, Path, description = "Account id")
    ),
    security(("session" = [])),
    responses(
        (status = 200, description = "Balance", body = BalanceResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Account not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn get_balance(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.bank.balance_of(&account_id, &user.email)?;

    Ok(Json(BalanceResponse {
        account_id,
        balance,
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
            ("A2", "bob@example.com", 700),
        ] {
            db.insert_account(&AccountRecord {
                id: id.to_string(),
                owner: owner.to_string(),
                balance,
            })
            .unwrap();
        }
        let state = AppState::new(db, b"accounts-test-secret", 1_000).expect("state");
        (state, dir)
    }

    fn alice() -> Auth {
        Auth(AuthenticatedUser {
            email: "alice@example.com".to_string(),
        })
    }

    #[tokio::test]
    async fn list_accounts_returns_only_owned_ids() {
        let (state, _dir) = seeded_state();
        let Json(response) = list_accounts(alice(), State(state)).await.unwrap();
        assert_eq!(response.email, "alice@example.com");
        assert_eq!(response.accounts, vec!["A1"]);
    }

    #[tokio::test]
    async fn balance_of_owned_account() {
        let (state, _dir) = seeded_state();
        let Json(response) = get_balance(alice(), State(state), Path("A1".to_string()))
            .await
            .unwrap();
        assert_eq!(response.balance, 500);
    }

    #[tokio::test]
    async fn foreign_account_reads_as_not_found() {
        let (state, _dir) = seeded_state();

        let foreign = get_balance(alice(), State(state.clone()), Path("A2".to_string()))
            .await
            .unwrap_err();
        let missing = get_balance(alice(), State(state), Path("A9".to_string()))
            .await
            .unwrap_err();

        assert_eq!(foreign.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(foreign.message, missing.message);
    }
}
