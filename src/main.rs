// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use tracing_subscriber::EnvFilter;

use relational_bank_server::{
    api::router,
    auth::CredentialVerifier,
    config::{
        DB_PATH_ENV, DEFAULT_DB_PATH, DEFAULT_TRANSFER_CEILING, SESSION_SECRET_ENV,
        TRANSFER_CEILING_ENV,
    },
    models::{AccountRecord, UserRecord},
    state::AppState,
    store::BankDatabase,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // The signing secret is mandatory; there is no insecure default.
    let secret = env::var(SESSION_SECRET_ENV)
        .unwrap_or_else(|_| panic!("{SESSION_SECRET_ENV} must be set"));

    let ceiling: i64 = env::var(TRANSFER_CEILING_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TRANSFER_CEILING);

    let db_path: PathBuf = env::var(DB_PATH_ENV)
        .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
        .into();
    let db = Arc::new(BankDatabase::open(&db_path).expect("Failed to open bank database"));

    if env::var("SEED_DEMO_DATA").is_ok() {
        seed_demo_data(&db);
    }

    let state = AppState::new(db, secret.as_bytes(), ceiling)
        .expect("Failed to initialize application state");
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Relational Bank server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("shutdown signal received");
}

/// Seed two demo users with one account each. Development convenience only;
/// real provisioning happens out of band.
fn seed_demo_data(db: &BankDatabase) {
    tracing::warn!("seeding demo users alice/bob with well-known passwords");

    let users = [
        ("alice@example.com", "Alice", "alicepass", "A1", 500),
        ("bob@example.com", "Bob", "bobpass", "A2", 500),
    ];

    for (email, name, password, account_id, balance) in users {
        let hash = CredentialVerifier::hash_password(password).expect("Failed to hash password");
        db.insert_user(&UserRecord {
            email: email.to_string(),
            name: name.to_string(),
            password_hash: hash,
        })
        .expect("Failed to seed user");
        db.insert_account(&AccountRecord {
            id: account_id.to_string(),
            owner: email.to_string(),
            balance,
        })
        .expect("Failed to seed account");
    }
}
