// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted record types for the users and accounts tables.

use serde::{Deserialize, Serialize};

/// A user row. Read-only to this service; provisioning happens out of band
/// (demo seeder or an operator tool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique email, the identity key.
    pub email: String,
    /// Display name.
    pub name: String,
    /// PHC-format pbkdf2-sha256 hash of the password.
    pub password_hash: String,
}

/// An account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique account identifier.
    pub id: String,
    /// Email of the owning user. Every account has exactly one owner.
    pub owner: String,
    /// Balance in the smallest currency unit.
    ///
    /// Non-negativity is enforced at transfer time inside the store
    /// transaction, not as a global invariant on the row.
    pub balance: i64,
}
