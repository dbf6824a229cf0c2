//! Error kinds for credential generation and header parsing.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;

/// Errors produced by [`generate_key`](crate::generate_key) and
/// [`extract_api_key`](crate::extract_api_key).
///
/// Callers branch on the variant. The display text is for humans only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request carried no `Authorization` header.
    #[error("no authorization header included")]
    NoAuthHeader,

    /// The `Authorization` header is not of the form `ApiKey <token>`.
    #[error("malformed authorization header")]
    MalformedAuthHeader,

    /// The random source could not supply bytes for a new key.
    #[error("entropy source unavailable: {0}")]
    EntropySource(#[from] rand::Error),
}

impl Error {
    /// Whether the client caused this error (4xx) rather than the server (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::NoAuthHeader | Error::MalformedAuthHeader)
    }

    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
