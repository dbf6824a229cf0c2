//! Authentication middleware.
//!
//! Provides a tower middleware that validates incoming requests using a
//! user-defined [`Authenticator`] trait. On success, the authenticated
//! claims are inserted into HTTP extensions and become accessible in
//! handlers via `Extension<Claims>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use keygate_auth::auth::{ApiKeyAuth, AuthLayer, Validator};
//!
//! #[derive(Clone)]
//! struct KeyStore;
//!
//! impl Validator for KeyStore {
//!     type Claims = String;
//!     type Error = UnknownKey;
//!
//!     async fn validate(&self, key: &str) -> Result<String, UnknownKey> {
//!         if key == "secret-key" { Ok("user1".into()) } else { Err(UnknownKey) }
//!     }
//! }
//!
//! let app = axum::Router::new()
//!     .route("/v1/users", get(handler).route_layer(AuthLayer::new(ApiKeyAuth::new(KeyStore))));
//! ```

mod api_key;

pub use api_key::{ApiKeyAuth, Rejection};

use axum::response::IntoResponse;
use futures::future::BoxFuture;
use http::{Request, Response};
use std::task::{Context, Poll};

/// Trait for validating incoming requests.
///
/// Implement this with your auth logic, or use [`ApiKeyAuth`].
/// On success, `Claims` is inserted into `http::Extensions`.
pub trait Authenticator: Clone + Send + Sync + 'static {
    /// The claims type produced on successful authentication.
    type Claims: Clone + Send + Sync + 'static;

    /// The error type returned on authentication failure. Rendered as the
    /// response when the request is rejected.
    type Error: std::fmt::Display + IntoResponse + Send;

    /// Validate the request and return claims, or an error.
    fn authenticate(
        &self,
        parts: &http::request::Parts,
    ) -> impl Future<Output = Result<Self::Claims, Self::Error>> + Send;
}

/// Trait for validating a credential string extracted from a request.
///
/// Users implement this to provide their lookup logic, then wrap it in
/// [`ApiKeyAuth`] which handles extraction from the `Authorization` header.
pub trait Validator: Clone + Send + Sync + 'static {
    /// The claims type produced on successful validation.
    type Claims: Clone + Send + Sync + 'static;

    /// The error type returned on validation failure.
    type Error: std::fmt::Display + IntoResponse + Send;

    /// Validate the credential string and return claims, or an error.
    fn validate(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<Self::Claims, Self::Error>> + Send;
}

/// Tower [`Layer`](tower::Layer) that applies [`AuthService`].
#[derive(Clone)]
pub struct AuthLayer<A> {
    authenticator: A,
}

impl<A> AuthLayer<A> {
    pub fn new(authenticator: A) -> Self {
        Self { authenticator }
    }
}

impl<A, S> tower::Layer<S> for AuthLayer<A>
where
    A: Clone,
{
    type Service = AuthService<A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            authenticator: self.authenticator.clone(),
            inner,
        }
    }
}

/// Tower service that authenticates requests before forwarding them.
#[derive(Clone)]
pub struct AuthService<A, S> {
    authenticator: A,
    inner: S,
}

impl<A, S, B> tower::Service<Request<B>> for AuthService<A, S>
where
    A: Authenticator,
    S: tower::Service<Request<B>, Response = Response<axum::body::Body>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Send,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let authenticator = self.authenticator.clone();
        let mut inner = self.inner.clone();
        // swap to ensure poll_ready state is preserved
        std::mem::swap(&mut self.inner, &mut inner);

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            match authenticator.authenticate(&parts).await {
                Ok(claims) => {
                    let mut req = Request::from_parts(parts, body);
                    req.extensions_mut().insert(claims);
                    inner.call(req).await
                }
                Err(err) => {
                    tracing::debug!(method = %parts.method, uri = %parts.uri, "rejected: {err}");
                    Ok(err.into_response())
                }
            }
        })
    }
}
