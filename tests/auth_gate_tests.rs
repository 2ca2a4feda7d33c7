use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, request::Parts},
};
use bookshelf_api::{
    ApiError, AppConfig, AppState,
    auth::{AuthUser, Claims, SESSION_AUTH_KEY, issue_token},
    repository::{MemoryRepository, RepositoryState},
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use tower_sessions::{MemoryStore, Session};

// --- Helper Functions ---

const TEST_TOKEN_SECRET: &str = "test-secret-value-1234567890";

fn create_app_state(token_secret: &str) -> AppState {
    let config = AppConfig {
        token_secret: token_secret.to_string(),
        ..AppConfig::default()
    };

    AppState {
        repo: Arc::new(MemoryRepository::new()) as RepositoryState,
        config,
    }
}

/// Helper to get the mutable Parts struct from a generated Request.
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

/// Builds a session the way the session layer would, so the extractor can be
/// driven without an HTTP round trip, and installs it in the request parts.
async fn parts_with_session(token: Option<String>) -> Parts {
    let store = Arc::new(MemoryStore::default());
    let session = Session::new(None, store, None);

    if let Some(token) = token {
        session.insert(SESSION_AUTH_KEY, token).await.unwrap();
    }

    let mut parts = get_request_parts(Method::PUT, "/review/1".parse().unwrap());
    parts.extensions.insert(session);
    parts
}

// --- Tests ---

#[tokio::test]
async fn gate_accepts_a_freshly_issued_token() {
    let token = issue_token("henrik", TEST_TOKEN_SECRET, 3600).unwrap();
    let app_state = create_app_state(TEST_TOKEN_SECRET);

    let mut parts = parts_with_session(Some(token)).await;
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    assert_eq!(auth_user.unwrap().username, "henrik");
}

#[tokio::test]
async fn gate_rejects_when_session_has_no_authorization_slot() {
    let app_state = create_app_state(TEST_TOKEN_SECRET);

    let mut parts = parts_with_session(None).await;
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    // Empty slot is the "not logged in" cause, distinct from a bad token.
    assert!(matches!(auth_user, Err(ApiError::NotLoggedIn)));
}

#[tokio::test]
async fn gate_rejects_a_token_signed_with_a_different_secret() {
    let token = issue_token("henrik", "some-other-secret", 3600).unwrap();
    let app_state = create_app_state(TEST_TOKEN_SECRET);

    let mut parts = parts_with_session(Some(token)).await;
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::NotAuthenticated)));
}

#[tokio::test]
async fn gate_rejects_an_expired_token() {
    // Crafted well past expiry so decoder leeway cannot rescue it.
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "henrik".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let key = EncodingKey::from_secret(TEST_TOKEN_SECRET.as_bytes());
    let token = encode(&Header::default(), &claims, &key).unwrap();

    let app_state = create_app_state(TEST_TOKEN_SECRET);
    let mut parts = parts_with_session(Some(token)).await;
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::NotAuthenticated)));
}

#[tokio::test]
async fn gate_rejects_a_malformed_blob() {
    let app_state = create_app_state(TEST_TOKEN_SECRET);

    let mut parts = parts_with_session(Some("definitely.not.a.jwt".to_string())).await;
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::NotAuthenticated)));
}
