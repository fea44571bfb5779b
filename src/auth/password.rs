// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential verification against stored pbkdf2-sha256 hashes.
//!
//! ## Timing
//!
//! Lookup misses still run one full pbkdf2 verification against a dummy
//! hash, so "unknown email" and "wrong password" consume comparable CPU
//! time and return the same value. Response text is equalized at the API
//! layer; this module equalizes the work.

use std::sync::Arc;

use pbkdf2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Pbkdf2,
};
use rand::rngs::OsRng;

use crate::store::{BankDatabase, StoreError};

/// Identity returned by a successful credential check.
#[derive(Debug, Clone)]
pub struct VerifiedCredentials {
    pub email: String,
    pub name: String,
}

/// Verifies email/password pairs against the user table.
pub struct CredentialVerifier {
    db: Arc<BankDatabase>,
    /// Hash of a throwaway password, computed once at construction and
    /// verified against whenever the email lookup misses.
    dummy_hash: String,
}

impl CredentialVerifier {
    pub fn new(db: Arc<BankDatabase>) -> Result<Self, pbkdf2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = Pbkdf2
            .hash_password(b"timing-equalization-dummy", &salt)?
            .to_string();
        Ok(Self { db, dummy_hash })
    }

    /// Hash a password for storage (PHC string, pbkdf2-sha256).
    ///
    /// Used by provisioning paths (demo seeder, tests); the verifier itself
    /// never writes.
    pub fn hash_password(password: &str) -> Result<String, pbkdf2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Pbkdf2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    /// Check `password` for the user identified by `email`.
    ///
    /// Returns `Ok(None)` for unknown email and wrong password alike; the
    /// two are indistinguishable in value and comparable in time. A store
    /// failure propagates as `Err` and is never folded into `None`.
    pub fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedCredentials>, StoreError> {
        let Some(user) = self.db.user_by_email(email)? else {
            self.burn(password);
            return Ok(None);
        };

        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Corrupt stored hash: fail closed, but keep the timing
                // profile of a normal mismatch.
                tracing::warn!("unparseable password hash for {email}: {e}");
                self.burn(password);
                return Ok(None);
            }
        };

        if Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok() {
            Ok(Some(VerifiedCredentials {
                email: user.email,
                name: user.name,
            }))
        } else {
            Ok(None)
        }
    }

    /// One pbkdf2 verification whose outcome is discarded.
    fn burn(&self, password: &str) {
        if let Ok(parsed) = PasswordHash::new(&self.dummy_hash) {
            let _ = Pbkdf2.verify_password(password.as_bytes(), &parsed);
        }
    }
}
