//! # keygate-auth
//!
//! Credential primitives for the keygate API.
//!
//! ## API keys
//!
//! [`generate_key`] issues a fresh credential: 32 bytes from the OS CSPRNG,
//! hashed with SHA-256 and hex-encoded to 64 lowercase characters.
//!
//! ## Header parsing
//!
//! [`extract_api_key`] pulls the credential out of an
//! `Authorization: ApiKey <token>` header and classifies every failure as an
//! [`Error`] kind.
//!
//! ## Auth Middleware
//!
//! Provides a pluggable [`Validator`](auth::Validator) trait and tower
//! middleware for validating requests before they reach a handler.
//!
//! ```rust,ignore
//! use keygate_auth::auth::{ApiKeyAuth, AuthLayer};
//!
//! let app = axum::Router::new()
//!     .route("/v1/users", get(handler).route_layer(AuthLayer::new(ApiKeyAuth::new(store))));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod error;
pub mod header;
pub mod key;

pub use error::Error;
pub use header::extract_api_key;
pub use key::{KeySource, OsKeySource, generate_key, generate_key_from};
