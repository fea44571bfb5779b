// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded bank database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: email → serialized UserRecord
//! - `accounts`: account id → serialized AccountRecord
//!
//! The rest of the service treats this module as an opaque relational
//! collaborator: parameterized lookups plus one transactional mutation.
//! redb serializes write transactions, so concurrent transfers touching the
//! same account serialize here and the in-transaction balance check is the
//! authoritative overdraw guard.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::models::{AccountRecord, UserRecord};

// =============================================================================
// Table Definitions
// =============================================================================

/// Users: email → serialized UserRecord (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Accounts: account id → serialized AccountRecord (JSON bytes).
const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An account row required by a mutation does not exist.
    #[error("account not found: {0}")]
    MissingAccount(String),

    /// A debit would take an account balance below zero. The transaction
    /// is aborted; no balance changes.
    #[error("balance overdraw on account {account}")]
    BalanceOverdraw { account: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// BankDatabase
// =============================================================================

/// Embedded ACID store for users and accounts.
pub struct BankDatabase {
    db: Database,
}

impl BankDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(ACCOUNTS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Look up a user row by email.
    pub fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        match table.get(email)? {
            Some(value) => {
                let user: UserRecord = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace a user row. Provisioning only (seeder, tests).
    pub fn insert_user(&self, user: &UserRecord) -> StoreResult<()> {
        let json = serde_json::to_vec(user)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            table.insert(user.email.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// `SELECT balance FROM accounts WHERE id=? AND owner=?`
    ///
    /// Returns `None` both when the account does not exist and when it is
    /// owned by someone else; callers cannot tell the two apart.
    pub fn balance_of(&self, account_id: &str, owner: &str) -> StoreResult<Option<i64>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        match table.get(account_id)? {
            Some(value) => {
                let account: AccountRecord = serde_json::from_slice(value.value())?;
                if account.owner == owner {
                    Ok(Some(account.balance))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    /// `SELECT id FROM accounts WHERE id=?`
    pub fn account_exists(&self, account_id: &str) -> StoreResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        Ok(table.get(account_id)?.is_some())
    }

    /// `SELECT id FROM accounts WHERE owner=?`
    ///
    /// Ids come back in table order (ascending by id), which keeps listings
    /// deterministic.
    pub fn accounts_of(&self, owner: &str) -> StoreResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;

        let mut ids = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let account: AccountRecord = serde_json::from_slice(value.value())?;
            if account.owner == owner {
                ids.push(account.id);
            }
        }
        Ok(ids)
    }

    /// Insert or replace an account row. Provisioning only (seeder, tests).
    pub fn insert_account(&self, account: &AccountRecord) -> StoreResult<()> {
        let json = serde_json::to_vec(account)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ACCOUNTS)?;
            table.insert(account.id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Paired `UPDATE accounts SET balance=balance-? / balance=balance+?`
    /// in one write transaction.
    ///
    /// Both mutations commit together or neither does: every early return
    /// drops the uncommitted transaction, so a debit is never visible
    /// without its matching credit. Row existence and balance sufficiency
    /// are re-checked here because this runs under redb's write
    /// serialization; the check in the transfer engine can be stale by the
    /// time the write begins. A transfer from an account to itself nets
    /// zero, as paired debit/credit updates on one row would.
    pub fn transfer_balances(&self, source: &str, target: &str, amount: i64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ACCOUNTS)?;

            let mut source_rec: AccountRecord = match table.get(source)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StoreError::MissingAccount(source.to_string())),
            };

            if source_rec.balance < amount {
                return Err(StoreError::BalanceOverdraw {
                    account: source_rec.id,
                });
            }

            // Debit and credit on the same row cancel out; writing nothing
            // keeps the balance exactly as the paired updates would.
            if source == target {
                return Ok(());
            }

            let mut target_rec: AccountRecord = match table.get(target)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StoreError::MissingAccount(target.to_string())),
            };

            source_rec.balance -= amount;
            target_rec.balance += amount;

            let source_json = serde_json::to_vec(&source_rec)?;
            let target_json = serde_json::to_vec(&target_rec)?;
            table.insert(source, source_json.as_slice())?;
            table.insert(target, target_json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_test_db() -> (BankDatabase, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let db = BankDatabase::open(&dir.path().join("bank.redb")).expect("open db");
        (db, dir)
    }

    fn seed_account(db: &BankDatabase, id: &str, owner: &str, balance: i64) {
        db.insert_account(&AccountRecord {
            id: id.to_string(),
            owner: owner.to_string(),
            balance,
        })
        .expect("insert account");
    }

    #[test]
    fn balance_of_requires_matching_owner() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 500);

        assert_eq!(
            db.balance_of("A1", "alice@example.com").unwrap(),
            Some(500)
        );
        // Wrong owner and missing account are indistinguishable
        assert_eq!(db.balance_of("A1", "bob@example.com").unwrap(), None);
        assert_eq!(db.balance_of("A9", "alice@example.com").unwrap(), None);
    }

    #[test]
    fn accounts_of_lists_only_owned_ids() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 100);
        seed_account(&db, "A2", "bob@example.com", 100);
        seed_account(&db, "A3", "alice@example.com", 100);

        assert_eq!(db.accounts_of("alice@example.com").unwrap(), vec!["A1", "A3"]);
        assert_eq!(db.accounts_of("bob@example.com").unwrap(), vec!["A2"]);
        assert!(db.accounts_of("nobody@example.com").unwrap().is_empty());
    }

    #[test]
    fn transfer_balances_moves_funds_atomically() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 500);
        seed_account(&db, "A2", "bob@example.com", 500);

        db.transfer_balances("A1", "A2", 200).unwrap();

        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(300));
        assert_eq!(db.balance_of("A2", "bob@example.com").unwrap(), Some(700));
    }

    #[test]
    fn transfer_balances_aborts_on_overdraw() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 100);
        seed_account(&db, "A2", "bob@example.com", 100);

        let err = db.transfer_balances("A1", "A2", 500).unwrap_err();
        assert!(matches!(err, StoreError::BalanceOverdraw { .. }));

        // Neither side changed
        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(100));
        assert_eq!(db.balance_of("A2", "bob@example.com").unwrap(), Some(100));
    }

    #[test]
    fn self_transfer_nets_zero() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 500);

        db.transfer_balances("A1", "A1", 200).unwrap();
        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(500));

        // Sufficiency still applies to the debit side
        let err = db.transfer_balances("A1", "A1", 600).unwrap_err();
        assert!(matches!(err, StoreError::BalanceOverdraw { .. }));
        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(500));
    }

    #[test]
    fn transfer_balances_aborts_on_missing_rows() {
        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 100);

        let err = db.transfer_balances("A1", "A9", 50).unwrap_err();
        assert!(matches!(err, StoreError::MissingAccount(id) if id == "A9"));
        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(100));

        let err = db.transfer_balances("A9", "A1", 50).unwrap_err();
        assert!(matches!(err, StoreError::MissingAccount(id) if id == "A9"));
    }

    #[test]
    fn concurrent_transfers_never_overdraw_or_lose_updates() {
        use std::sync::Arc;

        let (db, _dir) = open_test_db();
        seed_account(&db, "A1", "alice@example.com", 100);
        seed_account(&db, "A2", "bob@example.com", 0);

        let db = Arc::new(db);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = Arc::clone(&db);
            handles.push(std::thread::spawn(move || {
                let mut applied = 0;
                for _ in 0..25 {
                    if db.transfer_balances("A1", "A2", 1).is_ok() {
                        applied += 1;
                    }
                }
                applied
            }));
        }
        let applied: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 8 * 25 = 200 attempts against a balance of 100: exactly 100 can
        // succeed, and conservation must hold.
        assert_eq!(applied, 100);
        assert_eq!(db.balance_of("A1", "alice@example.com").unwrap(), Some(0));
        assert_eq!(db.balance_of("A2", "bob@example.com").unwrap(), Some(100));
    }

    #[test]
    fn user_lookup_roundtrip() {
        let (db, _dir) = open_test_db();
        db.insert_user(&UserRecord {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password_hash: "$pbkdf2-sha256$...".to_string(),
        })
        .unwrap();

        let user = db.user_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(user.name, "Alice");
        assert!(db.user_by_email("eve@example.com").unwrap().is_none());
    }
}
