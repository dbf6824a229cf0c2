//! API key authentication plugin.
//!
//! Extracts the credential from `Authorization: ApiKey <key>` and delegates
//! validation to a [`Validator`](super::Validator).

use crate::{
    Error,
    auth::{Authenticator, Validator},
    header::extract_api_key,
};
use axum::response::{IntoResponse, Response};

/// API key authenticator.
///
/// Runs [`extract_api_key`] on the request headers and passes the key to the
/// inner [`Validator`]. The key may be empty; rejecting it is the
/// validator's job.
#[derive(Clone)]
pub struct ApiKeyAuth<V> {
    validator: V,
}

impl<V> ApiKeyAuth<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }
}

/// Why [`ApiKeyAuth`] refused a request.
#[derive(Debug, thiserror::Error)]
pub enum Rejection<E> {
    /// The `Authorization` header was missing or malformed.
    #[error(transparent)]
    Header(#[from] Error),
    /// The validator refused the key.
    #[error("{0}")]
    Validator(E),
}

impl<E: IntoResponse> IntoResponse for Rejection<E> {
    fn into_response(self) -> Response {
        match self {
            Rejection::Header(err) => err.into_response(),
            Rejection::Validator(err) => err.into_response(),
        }
    }
}

impl<V> Authenticator for ApiKeyAuth<V>
where
    V: Validator,
{
    type Claims = V::Claims;
    type Error = Rejection<V::Error>;

    async fn authenticate(
        &self,
        parts: &http::request::Parts,
    ) -> Result<Self::Claims, Self::Error> {
        let key = extract_api_key(&parts.headers)?;
        self.validator.validate(key).await.map_err(Rejection::Validator)
    }
}
