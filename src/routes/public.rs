use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in): the read-only catalog lookups plus the identity
/// gateway functions, registration and login. Login is the only handler here
/// that touches the session, and only to write the authorization slot.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // POST /register
        // New user creation. Uniqueness of the username is enforced atomically
        // in the repository.
        .route("/register", post(handlers::register_user))
        // POST /login
        // Credential check against the user directory; on success a fresh
        // access token is issued and stored in the caller's session.
        .route("/login", post(handlers::login))
        // GET /
        // The complete catalog, keyed by ISBN, reviews included.
        .route("/", get(handlers::get_books))
        // GET /isbn/{isbn}
        .route("/isbn/{isbn}", get(handlers::get_book_by_isbn))
        // GET /author/{author} (exact-match search)
        .route("/author/{author}", get(handlers::get_books_by_author))
        // GET /title/{title} (exact-match search)
        .route("/title/{title}", get(handlers::get_books_by_title))
        // GET /review/{isbn}
        // One book's review ledger. The mutating methods on this path live in
        // the authenticated router.
        .route("/review/{isbn}", get(handlers::get_book_reviews))
}
