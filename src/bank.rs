// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer engine: ownership checks, transfer-limit policy, and the atomic
//! balance mutation.
//!
//! All operations take the requesting owner explicitly; there is no ambient
//! "current user" state. The engine is shared across requests behind an
//! `Arc` and holds no mutable state of its own.

use std::sync::Arc;

use crate::store::{BankDatabase, StoreError, StoreResult};

/// Failure classes for transfer-engine operations.
///
/// `NotFoundOrUnauthorized` deliberately merges "no such account" with "not
/// your account" so callers cannot probe which accounts exist. Store
/// failures stay a separate class and are never reported as business-rule
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("account not found")]
    NotFoundOrUnauthorized,

    #[error("target account not found")]
    TargetMissing,

    #[error("invalid transfer amount")]
    InvalidAmount,

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ownership-checked reads and atomic transfers over the bank store.
pub struct TransferEngine {
    db: Arc<BankDatabase>,
    /// Per-transfer amount ceiling. Policy, injected at construction.
    ceiling: i64,
}

impl TransferEngine {
    pub fn new(db: Arc<BankDatabase>, ceiling: i64) -> Self {
        Self { db, ceiling }
    }

    /// Return the balance of `account_id` if and only if it is owned by
    /// `owner`. A foreign account and a missing account both yield
    /// `NotFoundOrUnauthorized`; this is the sole authorization check for
    /// reads.
    pub fn balance_of(&self, account_id: &str, owner: &str) -> Result<i64, TransferError> {
        self.db
            .balance_of(account_id, owner)?
            .ok_or(TransferError::NotFoundOrUnauthorized)
    }

    /// List the account ids owned by `owner`.
    pub fn accounts_of(&self, owner: &str) -> StoreResult<Vec<String>> {
        self.db.accounts_of(owner)
    }

    /// Move `amount` from `source_id` to `target_id` on behalf of
    /// `requesting_owner`.
    ///
    /// Preconditions, first failing one wins:
    /// 1. the target account exists (anyone may receive funds, so there is
    ///    no ownership check on the target);
    /// 2. `0 <= amount <= ceiling`;
    /// 3. the requester owns the source account;
    /// 4. the source balance covers the amount.
    ///
    /// The balance mutation itself is a single store transaction; the store
    /// re-checks sufficiency under write serialization, so a concurrent
    /// transfer that drains the source between steps 4 and the commit
    /// surfaces as `InsufficientFunds` rather than an overdraw.
    ///
    /// There is no idempotency key: retrying a completed call executes the
    /// transfer again.
    pub fn transfer(
        &self,
        source_id: &str,
        target_id: &str,
        amount: i64,
        requesting_owner: &str,
    ) -> Result<(), TransferError> {
        if !self.db.account_exists(target_id)? {
            return Err(TransferError::TargetMissing);
        }

        if amount < 0 || amount > self.ceiling {
            return Err(TransferError::InvalidAmount);
        }

        let available = self.balance_of(source_id, requesting_owner)?;
        if amount > available {
            return Err(TransferError::InsufficientFunds);
        }

        self.db
            .transfer_balances(source_id, target_id, amount)
            .map_err(|e| match e {
                StoreError::BalanceOverdraw { .. } => TransferError::InsufficientFunds,
                StoreError::MissingAccount(id) if id == target_id => TransferError::TargetMissing,
                StoreError::MissingAccount(_) => TransferError::NotFoundOrUnauthorized,
                other => TransferError::Store(other),
            })
    }
}
