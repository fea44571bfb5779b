// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup and injected into constructed values; no module holds ambient
//! mutable state.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `BANK_DB_PATH` | Path of the embedded database file | `bank.redb` |
//! | `BANK_SESSION_SECRET` | HS256 secret for session tokens | Required |
//! | `BANK_TRANSFER_CEILING` | Maximum amount per transfer | `1000` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_DEMO_DATA` | Seed demo users and accounts when set | Unset |

/// Environment variable name for the database file path.
pub const DB_PATH_ENV: &str = "BANK_DB_PATH";

/// Default database file path.
pub const DEFAULT_DB_PATH: &str = "bank.redb";

/// Environment variable name for the session token signing secret.
///
/// The secret is process-wide and fixed at startup; rotating it invalidates
/// every outstanding session token at once.
pub const SESSION_SECRET_ENV: &str = "BANK_SESSION_SECRET";

/// Environment variable name for the per-transfer amount ceiling.
pub const TRANSFER_CEILING_ENV: &str = "BANK_TRANSFER_CEILING";

/// Default per-transfer amount ceiling, in the smallest currency unit.
///
/// An abuse-limiting policy constant, not a domain rule.
pub const DEFAULT_TRANSFER_CEILING: i64 = 1_000;

/// Session token lifetime in seconds (60 minutes).
pub const SESSION_TTL_SECS: i64 = 60 * 60;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";
