use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// --- Core Application Schemas ---

/// User
///
/// Represents a registered identity in the user directory. Created by
/// registration, never mutated, never deleted. The password is stored and
/// compared as given; a pluggable hash-and-compare verifier behind the same
/// contract is the documented hardening path.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct User {
    // Unique, case-sensitive.
    pub username: String,
    pub password: String,
}

/// Book
///
/// A catalog record together with its review ledger. The catalog's ISBN set is
/// fixed at startup; only the `reviews` map mutates, through the repository's
/// upsert/remove operations. Keys of `reviews` are usernames, so each user holds
/// at most one review per book.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub reviews: BTreeMap<String, String>,
}

impl Book {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            reviews: BTreeMap::new(),
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// RegisterRequest
///
/// Input payload for the public registration endpoint (POST /register).
/// Absent fields deserialize as empty strings so that absent and empty are
/// rejected identically, with the field-specific message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// LoginRequest
///
/// Input payload for POST /login. Same wire shape as registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// ReviewRequest
///
/// Input payload for PUT /review/{isbn}. The review owner is never part of the
/// payload; it is always the identity resolved by the authentication gate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ReviewRequest {
    #[serde(default)]
    pub review: String,
}

// --- Response Schemas ---

/// MessageResponse
///
/// Plain confirmation body used by register and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct MessageResponse {
    pub message: String,
}

/// ReviewUpdateResponse
///
/// Returned by the review mutation endpoints: a confirmation message plus the
/// updated book snapshot, so the client sees the ledger state after the change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ReviewUpdateResponse {
    pub message: String,
    pub book: Book,
}
