//! Handler errors and their HTTP rendering.

use crate::store::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors returned by the HTTP handlers.
///
/// The display text is the `error` field of the JSON response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Couldn't decode parameters: {0}")]
    Decode(String),

    #[error("Name cannot be empty")]
    EmptyName,

    /// The entropy error is part of the message, not a separate source.
    #[error("Couldn't generate API key: {0}")]
    KeyGeneration(keygate_auth::Error),

    #[error("Couldn't create user")]
    CreateUser(#[source] StoreError),

    #[error("Couldn't get user")]
    GetUser(#[source] StoreError),

    /// No user owns the presented API key.
    #[error("Couldn't get user")]
    UserNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::EmptyName => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::KeyGeneration(_) | ApiError::CreateUser(_) | ApiError::GetUser(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match std::error::Error::source(&self) {
                Some(source) => tracing::error!("responding with {status}: {self}: {source}"),
                None => tracing::error!("responding with {status}: {self}"),
            }
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
