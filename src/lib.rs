// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Bank - Minimal Online Banking Service
//!
//! This crate provides a small banking service: users log in with email and
//! password, receive a stateless signed session token, and can list their
//! accounts, check balances, and transfer funds between accounts.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential verification, session tokens, request gating
//! - `bank` - Transfer engine (ownership, limits, atomic balance mutation)
//! - `store` - Embedded ACID store (redb) for users and accounts

pub mod api;
pub mod auth;
pub mod bank;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
