use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    models::{
        Book, LoginRequest, MessageResponse, RegisterRequest, ReviewRequest, ReviewUpdateResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
};
use std::collections::BTreeMap;
use tower_sessions::Session;

/// require_field
///
/// Rejects empty (or whitespace-only) identity fields. Absent fields
/// deserialize as empty via `#[serde(default)]`, so they land here too.
fn require_field(value: &str, name: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::MissingField(name));
    }
    Ok(())
}

// --- Identity Handlers ---

/// register_user
///
/// [Public Route] Appends a new user to the directory. Fails without side
/// effects if either field is empty or the username is already taken.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = MessageResponse),
        (status = 400, description = "Missing username or password"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_field(&payload.username, "username")?;
    require_field(&payload.password, "password")?;

    state
        .repo
        .register_user(&payload.username, &payload.password)
        .await?;

    tracing::info!(username = %payload.username, "user registered");
    Ok(Json(MessageResponse {
        message: "User successfully registered. Now you can login".to_string(),
    }))
}

/// login
///
/// [Public Route] The only path that writes the session's authorization slot.
/// On a successful directory check it issues a fresh access token and stores
/// it in the caller's session; the authentication gate reads it back on every
/// protected request.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session holds the token", body = MessageResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_field(&payload.username, "username")?;
    require_field(&payload.password, "password")?;

    if !state
        .repo
        .verify_credentials(&payload.username, &payload.password)
        .await
    {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(
        &payload.username,
        &state.config.token_secret,
        state.config.token_ttl_secs,
    )?;

    session
        .insert(auth::SESSION_AUTH_KEY, token)
        .await
        .map_err(|e| ApiError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(username = %payload.username, "user logged in");
    Ok(Json(MessageResponse {
        message: "User successfully logged in".to_string(),
    }))
}

// --- Catalog Handlers (read-only) ---

/// get_books
///
/// [Public Route] The full catalog, keyed by ISBN.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Catalog", body = BTreeMap<String, Book>))
)]
pub async fn get_books(State(state): State<AppState>) -> Json<BTreeMap<String, Book>> {
    Json(state.repo.list_books().await)
}

/// get_book_by_isbn
///
/// [Public Route] Single book lookup.
#[utoipa::path(
    get,
    path = "/isbn/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Found", body = Book),
        (status = 404, description = "Unknown ISBN")
    )
)]
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    match state.repo.get_book(&isbn).await {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::BookNotFound),
    }
}

/// get_books_by_author
///
/// [Public Route] Exact-match author search. An unmatched author yields an
/// empty list, not an error.
#[utoipa::path(
    get,
    path = "/author/{author}",
    params(("author" = String, Path, description = "Author name, exact match")),
    responses((status = 200, description = "Matching books", body = [Book]))
)]
pub async fn get_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.repo.books_by_author(&author).await)
}

/// get_books_by_title
///
/// [Public Route] Exact-match title search.
#[utoipa::path(
    get,
    path = "/title/{title}",
    params(("title" = String, Path, description = "Book title, exact match")),
    responses((status = 200, description = "Matching books", body = [Book]))
)]
pub async fn get_books_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.repo.books_by_title(&title).await)
}

/// get_book_reviews
///
/// [Public Route] The review ledger of one book, keyed by reviewer username.
#[utoipa::path(
    get,
    path = "/review/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Reviews", body = BTreeMap<String, String>),
        (status = 404, description = "Unknown ISBN")
    )
)]
pub async fn get_book_reviews(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    match state.repo.get_reviews(&isbn).await {
        Some(reviews) => Ok(Json(reviews)),
        None => Err(ApiError::BookNotFound),
    }
}

// --- Review Ledger Handlers (protected) ---

/// put_review
///
/// [Protected Route] Adds or updates the requesting user's review on a book.
/// The review owner is the identity resolved by the gate, so a user can only
/// ever write their own entry; a second submission overwrites it.
#[utoipa::path(
    put,
    path = "/review/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review added or updated", body = ReviewUpdateResponse),
        (status = 401, description = "Not logged in or not authenticated"),
        (status = 404, description = "Unknown ISBN")
    )
)]
pub async fn put_review(
    AuthUser { username }: AuthUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewUpdateResponse>, ApiError> {
    let book = state
        .repo
        .upsert_review(&isbn, &username, &payload.review)
        .await?;

    Ok(Json(ReviewUpdateResponse {
        message: format!("Review for ISBN:{isbn} user:{username} added/updated successfully."),
        book,
    }))
}

/// delete_review
///
/// [Protected Route] Deletes only the requesting user's own review. Unknown
/// ISBN and missing review are both 404 but carry distinct messages.
#[utoipa::path(
    delete,
    path = "/review/{isbn}",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Review deleted", body = ReviewUpdateResponse),
        (status = 401, description = "Not logged in or not authenticated"),
        (status = 404, description = "Unknown ISBN or no review by this user")
    )
)]
pub async fn delete_review(
    AuthUser { username }: AuthUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<ReviewUpdateResponse>, ApiError> {
    let book = state.repo.remove_review(&isbn, &username).await?;

    Ok(Json(ReviewUpdateResponse {
        message: format!("Review for ISBN:{isbn} by user:{username} deleted successfully."),
        book,
    }))
}
