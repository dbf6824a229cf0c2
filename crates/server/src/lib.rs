//! HTTP API for creating users and issuing API keys.
//!
//! Routes:
//! - `POST /v1/users` creates a user from `{"name": ...}` and returns it with
//!   its freshly issued API key.
//! - `GET /v1/users` returns the user owning `Authorization: ApiKey <key>`.

use anyhow::Context;
use axum::{Router, routing::get};
use keygate_auth::{
    KeySource, OsKeySource,
    auth::{ApiKeyAuth, AuthLayer},
};
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod store;
pub mod user;

use config::Config;
use store::{MemoryStore, UserStore};
use user::UserLookup;

/// Shared handler state.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub keys: Arc<dyn KeySource>,
}

impl<S> AppState<S> {
    pub fn new(store: S, keys: impl KeySource) -> Self {
        Self {
            store: Arc::new(store),
            keys: Arc::new(keys),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            keys: self.keys.clone(),
        }
    }
}

/// Build the API router.
pub fn router<S: UserStore>(state: AppState<S>) -> Router {
    let auth = AuthLayer::new(ApiKeyAuth::new(UserLookup::new(state.store.clone())));

    // route_layer only wraps the methods registered before it
    Router::new()
        .route(
            "/v1/users",
            get(user::get_user)
                .route_layer(auth)
                .post(user::create_user::<S>),
        )
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(MemoryStore::new(), OsKeySource);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
