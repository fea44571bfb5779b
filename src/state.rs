// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{CredentialVerifier, TokenService};
use crate::bank::TransferEngine;
use crate::config::SESSION_TTL_SECS;
use crate::store::BankDatabase;

/// Shared application state: the store plus the three services built on it.
///
/// Everything configurable (signing secret, transfer ceiling) is injected
/// here at startup; nothing reads configuration afterwards.
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<TransferEngine>,
    pub verifier: Arc<CredentialVerifier>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        db: Arc<BankDatabase>,
        session_secret: &[u8],
        transfer_ceiling: i64,
    ) -> Result<Self, pbkdf2::password_hash::Error> {
        Ok(Self {
            bank: Arc::new(TransferEngine::new(Arc::clone(&db), transfer_ceiling)),
            verifier: Arc::new(CredentialVerifier::new(Arc::clone(&db))?),
            tokens: Arc::new(TokenService::new(session_secret, SESSION_TTL_SECS)),
        })
    }
}
