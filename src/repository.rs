use crate::{
    catalog,
    error::ApiError,
    models::{Book, User},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Repository Trait
///
/// Defines the abstract contract for all shared-state operations: the user
/// directory, the read-only catalog lookups, and the review ledger mutations.
/// Handlers interact with this trait only, never with a concrete store.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's asynchronous task
/// boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- User Directory ---
    /// True iff a user with exactly this username is registered.
    async fn user_exists(&self, username: &str) -> bool;
    /// True iff a registered user matches exactly this username/password pair.
    async fn verify_credentials(&self, username: &str, password: &str) -> bool;
    /// Appends a new user. Fails with `UserAlreadyExists` if the name is taken;
    /// no side effects on failure.
    async fn register_user(&self, username: &str, password: &str) -> Result<(), ApiError>;
    /// Number of registered users. Used by tests to assert failed registration
    /// left the directory unchanged.
    async fn user_count(&self) -> usize;

    // --- Catalog (read-only) ---
    async fn list_books(&self) -> BTreeMap<String, Book>;
    async fn get_book(&self, isbn: &str) -> Option<Book>;
    /// Exact-match author search.
    async fn books_by_author(&self, author: &str) -> Vec<Book>;
    /// Exact-match title search.
    async fn books_by_title(&self, title: &str) -> Vec<Book>;
    async fn get_reviews(&self, isbn: &str) -> Option<BTreeMap<String, String>>;

    // --- Review Ledger ---
    /// Sets `reviews[username] = text` on the book, overwriting any prior entry
    /// by the same user, and returns the updated snapshot.
    async fn upsert_review(
        &self,
        isbn: &str,
        username: &str,
        text: &str,
    ) -> Result<Book, ApiError>;
    /// Deletes the user's review entry and returns the updated snapshot.
    /// Fails with `ReviewNotFound` if the book exists but carries no entry
    /// for this user.
    async fn remove_review(&self, isbn: &str, username: &str) -> Result<Book, ApiError>;
}

/// RepositoryState
///
/// The concrete type used to share the state layer across the application.
pub type RepositoryState = Arc<dyn Repository>;

/// MemoryRepository
///
/// The concrete in-memory implementation. All state is process-wide and lost on
/// restart. Each map sits behind its own `RwLock`; every check-then-mutate
/// sequence (registration uniqueness, per-book review upsert/remove) happens
/// under a single write-lock acquisition, so concurrent requests can never
/// observe or produce a partial mutation. No lock is held across an await point.
pub struct MemoryRepository {
    // username -> user record
    users: RwLock<BTreeMap<String, User>>,
    // isbn -> book (reviews embedded)
    books: RwLock<BTreeMap<String, Book>>,
}

impl MemoryRepository {
    /// Creates a repository seeded with the built-in catalog and an empty
    /// user directory.
    pub fn new() -> Self {
        Self::with_catalog(catalog::builtin())
    }

    /// Creates a repository over an explicit catalog. Used by tests that need
    /// a controlled ISBN set.
    pub fn with_catalog(books: BTreeMap<String, Book>) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            books: RwLock::new(books),
        }
    }

    fn read_users(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, User>> {
        self.users.read().unwrap_or_else(|e| e.into_inner())
    }

    fn read_books(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Book>> {
        self.books.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn user_exists(&self, username: &str) -> bool {
        self.read_users().contains_key(username)
    }

    /// verify_credentials
    ///
    /// Plain equality comparison, matching the directory's storage format.
    async fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.read_users()
            .get(username)
            .is_some_and(|user| user.password == password)
    }

    /// register_user
    ///
    /// The uniqueness check and the insert happen under one write lock, so two
    /// concurrent registrations for the same username cannot both succeed.
    async fn register_user(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        if users.contains_key(username) {
            return Err(ApiError::UserAlreadyExists);
        }
        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password: password.to_string(),
            },
        );
        Ok(())
    }

    async fn user_count(&self) -> usize {
        self.read_users().len()
    }

    async fn list_books(&self) -> BTreeMap<String, Book> {
        self.read_books().clone()
    }

    async fn get_book(&self, isbn: &str) -> Option<Book> {
        self.read_books().get(isbn).cloned()
    }

    async fn books_by_author(&self, author: &str) -> Vec<Book> {
        self.read_books()
            .values()
            .filter(|book| book.author == author)
            .cloned()
            .collect()
    }

    async fn books_by_title(&self, title: &str) -> Vec<Book> {
        self.read_books()
            .values()
            .filter(|book| book.title == title)
            .cloned()
            .collect()
    }

    async fn get_reviews(&self, isbn: &str) -> Option<BTreeMap<String, String>> {
        self.read_books().get(isbn).map(|book| book.reviews.clone())
    }

    /// upsert_review
    ///
    /// Check-then-mutate on the book's review map under one write lock.
    /// A second submission by the same user overwrites, never duplicates.
    async fn upsert_review(
        &self,
        isbn: &str,
        username: &str,
        text: &str,
    ) -> Result<Book, ApiError> {
        let mut books = self.books.write().unwrap_or_else(|e| e.into_inner());
        let book = books.get_mut(isbn).ok_or(ApiError::BookNotFound)?;
        book.reviews.insert(username.to_string(), text.to_string());
        Ok(book.clone())
    }

    /// remove_review
    ///
    /// Unknown ISBN and missing review are distinct failures; the ledger is
    /// untouched in both cases.
    async fn remove_review(&self, isbn: &str, username: &str) -> Result<Book, ApiError> {
        let mut books = self.books.write().unwrap_or_else(|e| e.into_inner());
        let book = books.get_mut(isbn).ok_or(ApiError::BookNotFound)?;
        if book.reviews.remove(username).is_none() {
            return Err(ApiError::ReviewNotFound);
        }
        Ok(book.clone())
    }
}
