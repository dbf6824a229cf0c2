//! User records and the `/v1/users` handlers.

use crate::{
    AppState,
    error::ApiError,
    store::{StoreError, UserStore},
};
use axum::{Extension, Json, body::Bytes, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use keygate_auth::auth::Validator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    /// 64-char hex credential; also the store's lookup key.
    pub api_key: String,
}

impl User {
    /// Build a new user with a fresh id, stamped now.
    pub fn new(name: String, api_key: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name,
            api_key,
        }
    }
}

/// Body of `POST /v1/users`. A missing or null name reads as empty.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
}

/// `POST /v1/users`: create a user and issue its API key.
///
/// The body is decoded as JSON whatever its `Content-Type`.
pub async fn create_user<S: UserStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let params: CreateUser =
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let name = params.name.unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::EmptyName);
    }

    let api_key = state.keys.generate().map_err(ApiError::KeyGeneration)?;
    let user = User::new(name, api_key);
    state
        .store
        .create_user(user.clone())
        .await
        .map_err(ApiError::CreateUser)?;

    let user = state
        .store
        .get_user(&user.api_key)
        .await
        .map_err(ApiError::GetUser)?
        .ok_or_else(|| {
            ApiError::GetUser(StoreError::Unavailable(format!(
                "user {} missing after insert",
                user.id
            )))
        })?;

    tracing::info!(id = %user.id, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /v1/users`: the user owning the request's API key.
pub async fn get_user(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

/// [`Validator`] that resolves an API key to its [`User`].
pub struct UserLookup<S> {
    store: Arc<S>,
}

impl<S> UserLookup<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> Clone for UserLookup<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: UserStore> Validator for UserLookup<S> {
    type Claims = User;
    type Error = ApiError;

    async fn validate(&self, credential: &str) -> Result<User, ApiError> {
        self.store
            .get_user(credential)
            .await
            .map_err(ApiError::GetUser)?
            .ok_or(ApiError::UserNotFound)
    }
}
