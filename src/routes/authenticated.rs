use crate::{AppState, handlers};
use axum::{Router, routing::put};

/// Authenticated Router Module
///
/// Defines the routes that require a session holding a valid access token:
/// the review ledger mutations. The caller's identity for both operations is
/// the username resolved by the gate, never anything taken from the payload,
/// so a user can only ever mutate their own review.
///
/// Access Control Strategy:
/// The router assembly wraps this module in the `auth_middleware` route layer,
/// and every handler additionally takes the `AuthUser` extractor. The layer
/// rejects unauthenticated requests before a handler body runs; the extractor
/// gives the handler the resolved username.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // PUT /review/{isbn}
        // Adds or updates the caller's single review on a book (upsert).
        // DELETE /review/{isbn}
        // Removes the caller's review; 404 if the book is unknown or the
        // caller has no review on it.
        .route(
            "/review/{isbn}",
            put(handlers::put_review).delete(handlers::delete_review),
        )
}
