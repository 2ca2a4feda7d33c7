use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The full client-facing error taxonomy of the service. Every fallible handler
/// returns one of these variants; none of them is fatal to the process. Each
/// variant carries its own status code and a human-readable message so clients
/// can distinguish failure causes (notably the two authentication rejections).
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field was absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Registration attempted with a username that is already taken.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Login attempted with a username/password pair that matches no registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session carries no authorization slot at all.
    #[error("user not logged in")]
    NotLoggedIn,

    /// The session holds a token that failed verification (bad signature or expired).
    #[error("user not authenticated")]
    NotAuthenticated,

    /// The requested ISBN is not in the catalog.
    #[error("book not found")]
    BookNotFound,

    /// The book exists but the user has no review on it to delete.
    #[error("review by this user not found")]
    ReviewNotFound,

    /// The session store failed or the token could not be signed. Never expected
    /// with the in-memory store; surfaced as a generic 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The status code rendered for this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::UserAlreadyExists => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::BookNotFound => StatusCode::NOT_FOUND,
            ApiError::ReviewNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    /// Renders the error as `{"message": "..."}` with the kind-specific status.
    /// Internal failures are logged with their detail but the client only sees
    /// a generic message.
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {detail}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "internal server error" })),
            )
                .into_response();
        }

        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}
