use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use keygate_auth::{Error, KeySource, OsKeySource};
use keygate_server::{
    AppState, router,
    store::{MemoryStore, StoreError, UserStore},
    user::User,
};
use serde_json::Value;
use tower::ServiceExt;

/// Key source whose entropy is never available.
struct NoEntropy;

impl KeySource for NoEntropy {
    fn generate(&self) -> Result<String, Error> {
        Err(Error::EntropySource(rand::Error::new("getrandom denied")))
    }
}

/// Store whose backend is down.
struct DownStore;

impl UserStore for DownStore {
    async fn create_user(&self, _user: User) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_user(&self, _api_key: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn app() -> Router {
    router(AppState::new(MemoryStore::new(), OsKeySource))
}

fn create_request(body: &str) -> Request<Body> {
    Request::post("/v1/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::get("/v1/users");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should be json")
}

#[tokio::test]
async fn create_user_issues_key() {
    let resp = app()
        .oneshot(create_request(r#"{"name":"alice"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json(resp).await;
    assert_eq!(body["name"], "alice");
    let key = body["api_key"].as_str().expect("api_key is a string");
    assert_eq!(key.len(), 64);
    assert!(key.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn create_then_fetch_with_key() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(create_request(r#"{"name":"alice"}"#))
        .await
        .unwrap();
    let created = json(resp).await;
    let key = created["api_key"].as_str().unwrap();

    let resp = app
        .oneshot(get_request(Some(&format!("ApiKey {key}"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await, created);
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let resp = app()
        .oneshot(create_request(r#"{"name":""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["error"], "Name cannot be empty");
}

#[tokio::test]
async fn missing_or_null_name_is_empty_name() {
    for body in [r#"{}"#, r#"{"name":null}"#] {
        let resp = app().oneshot(create_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json(resp).await["error"], "Name cannot be empty");
    }
}

#[tokio::test]
async fn create_ignores_content_type() {
    let untyped = Request::post("/v1/users")
        .body(Body::from(r#"{"name":"alice"}"#))
        .unwrap();
    let resp = app().oneshot(untyped).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json(resp).await["name"], "alice");

    let text = Request::post("/v1/users")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"name":"bob"}"#))
        .unwrap();
    let resp = app().oneshot(text).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let req = Request::post("/v1/users").body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json(resp).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Couldn't decode parameters: ")
    );
}

#[tokio::test]
async fn undecodable_body_is_rejected() {
    let resp = app().oneshot(create_request("{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Couldn't decode parameters: "), "{message}");
}

#[tokio::test]
async fn entropy_failure_is_server_error() {
    let app = router(AppState::new(MemoryStore::new(), NoEntropy));
    let resp = app
        .oneshot(create_request(r#"{"name":"alice"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Couldn't generate API key: "), "{message}");
}

#[tokio::test]
async fn store_failure_on_create() {
    let app = router(AppState::new(DownStore, OsKeySource));
    let resp = app
        .oneshot(create_request(r#"{"name":"alice"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(resp).await["error"], "Couldn't create user");
}

#[tokio::test]
async fn store_failure_on_lookup() {
    let app = router(AppState::new(DownStore, OsKeySource));
    let resp = app.oneshot(get_request(Some("ApiKey abc123"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(resp).await["error"], "Couldn't get user");
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let resp = app().oneshot(get_request(None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json(resp).await["error"],
        "no authorization header included"
    );
}

#[tokio::test]
async fn malformed_header_is_unauthorized() {
    for value in ["abc123", "Bearer abc123", "apikey abc123"] {
        let resp = app().oneshot(get_request(Some(value))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(json(resp).await["error"], "malformed authorization header");
    }
}

#[tokio::test]
async fn unknown_key_is_not_found() {
    let resp = app()
        .oneshot(get_request(Some("ApiKey abc123")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["error"], "Couldn't get user");
}

#[tokio::test]
async fn empty_key_is_not_found() {
    let resp = app().oneshot(get_request(Some("ApiKey "))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_does_not_require_auth() {
    let resp = app()
        .oneshot(
            Request::post("/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer junk")
                .body(Body::from(r#"{"name":"bob"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}
