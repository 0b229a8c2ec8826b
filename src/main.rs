// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use relational_studio_server::{
    api::router,
    auth::TokenSigner,
    config::{AppConfig, DATA_DIR_ENV},
    logging::init_tracing,
    state::AppState,
    storage::{
        IdentityRepository, IdentityStore, JsonStorage, MemoryStore, SessionRepository,
        SessionStore, StoragePaths,
    },
};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if config.jwt_secret_generated {
        tracing::warn!("JWT_SECRET not set; using a random per-process secret");
    }

    let (identities, sessions) = build_stores(&config);
    let signer = TokenSigner::new(&config.jwt_secret, config.token_validity);
    let state = AppState::new(identities, sessions, signer);

    if let Some(seed) = &config.seed_admin {
        match state.accounts.seed_admin(&seed.email, &seed.password) {
            Ok(true) => tracing::info!("Seeded admin account"),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to seed admin account");
                std::process::exit(1);
            }
        }
    }

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(
        addr = %config.bind_addr,
        "Relational Studio server listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// In-memory stores unless `DATA_DIR` is set.
fn build_stores(config: &AppConfig) -> (Arc<dyn IdentityStore>, Arc<dyn SessionStore>) {
    let Some(dir) = &config.data_dir else {
        tracing::warn!("{DATA_DIR_ENV} not set; data is kept in memory only");
        let store = Arc::new(MemoryStore::new());
        let identities: Arc<dyn IdentityStore> = store.clone();
        let sessions: Arc<dyn SessionStore> = store;
        return (identities, sessions);
    };

    let mut storage = JsonStorage::new(StoragePaths::new(dir));
    storage
        .initialize()
        .expect("Failed to initialize data directory");
    tracing::info!(data_dir = %dir.display(), "Using JSON file store");

    let storage = Arc::new(storage);
    let identities: Arc<dyn IdentityStore> = Arc::new(IdentityRepository::new(storage.clone()));
    let sessions: Arc<dyn SessionStore> = Arc::new(SessionRepository::new(storage));
    (identities, sessions)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
