use bookshelf_api::{
    ApiError,
    repository::{MemoryRepository, Repository},
};

// --- User Directory ---

#[tokio::test]
async fn registered_credentials_verify_exactly() {
    let repo = MemoryRepository::new();

    repo.register_user("henrik", "theGreat").await.unwrap();

    assert!(repo.user_exists("henrik").await);
    assert!(repo.verify_credentials("henrik", "theGreat").await);
    // Wrong password, wrong user, wrong case: all refused.
    assert!(!repo.verify_credentials("henrik", "thegreat").await);
    assert!(!repo.verify_credentials("Henrik", "theGreat").await);
    assert!(!repo.verify_credentials("nobody", "theGreat").await);
}

#[tokio::test]
async fn duplicate_registration_fails_without_side_effects() {
    let repo = MemoryRepository::new();

    repo.register_user("alice", "wonderland").await.unwrap();
    assert_eq!(repo.user_count().await, 1);

    let second = repo.register_user("alice", "other").await;
    assert!(matches!(second, Err(ApiError::UserAlreadyExists)));

    // Directory unchanged: same size, original credential still the one that verifies.
    assert_eq!(repo.user_count().await, 1);
    assert!(repo.verify_credentials("alice", "wonderland").await);
    assert!(!repo.verify_credentials("alice", "other").await);
}

#[tokio::test]
async fn concurrent_registrations_of_one_name_yield_a_single_user() {
    let repo = std::sync::Arc::new(MemoryRepository::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.register_user("dana", &format!("pw{i}")).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.user_count().await, 1);
}

// --- Catalog lookups ---

#[tokio::test]
async fn catalog_is_seeded_and_searchable() {
    let repo = MemoryRepository::new();

    let books = repo.list_books().await;
    assert_eq!(books.len(), 10);

    let book = repo.get_book("1").await.unwrap();
    assert_eq!(book.title, "Things Fall Apart");
    assert!(repo.get_book("9999").await.is_none());

    let by_author = repo.books_by_author("Unknown").await;
    assert_eq!(by_author.len(), 4);

    let by_title = repo.books_by_title("Pride and Prejudice").await;
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].isbn, "8");

    // Exact match only
    assert!(repo.books_by_author("jane austen").await.is_empty());
}

// --- Review Ledger ---

#[tokio::test]
async fn upsert_overwrites_instead_of_duplicating() {
    let repo = MemoryRepository::new();

    let book = repo.upsert_review("1", "alice", "great").await.unwrap();
    assert_eq!(book.reviews.get("alice").map(String::as_str), Some("great"));

    let book = repo.upsert_review("1", "alice", "changed").await.unwrap();
    assert_eq!(book.reviews.len(), 1);
    assert_eq!(
        book.reviews.get("alice").map(String::as_str),
        Some("changed")
    );
}

#[tokio::test]
async fn upsert_on_unknown_isbn_fails() {
    let repo = MemoryRepository::new();

    let result = repo.upsert_review("9999", "alice", "x").await;
    assert!(matches!(result, Err(ApiError::BookNotFound)));
}

#[tokio::test]
async fn remove_without_a_review_leaves_the_ledger_unchanged() {
    let repo = MemoryRepository::new();

    repo.upsert_review("1", "alice", "great").await.unwrap();

    let result = repo.remove_review("1", "bob").await;
    assert!(matches!(result, Err(ApiError::ReviewNotFound)));

    // Alice's entry survived bob's failed delete.
    let reviews = repo.get_reviews("1").await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews.get("alice").map(String::as_str), Some("great"));
}

#[tokio::test]
async fn remove_deletes_only_the_callers_entry() {
    let repo = MemoryRepository::new();

    repo.upsert_review("2", "alice", "lovely").await.unwrap();
    repo.upsert_review("2", "bob", "fine").await.unwrap();

    let book = repo.remove_review("2", "bob").await.unwrap();
    assert_eq!(book.reviews.len(), 1);
    assert!(book.reviews.contains_key("alice"));

    let result = repo.remove_review("9999", "alice").await;
    assert!(matches!(result, Err(ApiError::BookNotFound)));
}

#[tokio::test]
async fn review_entry_exists_iff_active() {
    let repo = MemoryRepository::new();

    assert!(repo.get_reviews("5").await.unwrap().is_empty());

    repo.upsert_review("5", "carol", "dense").await.unwrap();
    assert!(repo.get_reviews("5").await.unwrap().contains_key("carol"));

    repo.remove_review("5", "carol").await.unwrap();
    assert!(repo.get_reviews("5").await.unwrap().is_empty());

    // Unknown ISBN has no ledger at all.
    assert!(repo.get_reviews("9999").await.is_none());
}
