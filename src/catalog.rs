use crate::models::Book;
use std::collections::BTreeMap;

/// builtin
///
/// The fixed catalog the service starts with. The ISBN set is not
/// user-extensible; only the review ledgers on these records ever change.
pub fn builtin() -> BTreeMap<String, Book> {
    [
        Book::new("1", "Things Fall Apart", "Chinua Achebe"),
        Book::new("2", "Fairy tales", "Hans Christian Andersen"),
        Book::new("3", "The Divine Comedy", "Dante Alighieri"),
        Book::new("4", "The Epic Of Gilgamesh", "Unknown"),
        Book::new("5", "The Book Of Job", "Unknown"),
        Book::new("6", "One Thousand and One Nights", "Unknown"),
        Book::new("7", "Njal's Saga", "Unknown"),
        Book::new("8", "Pride and Prejudice", "Jane Austen"),
        Book::new("9", "Le Pere Goriot", "Honore de Balzac"),
        Book::new(
            "10",
            "Molloy, Malone Dies, The Unnamable, the trilogy",
            "Samuel Beckett",
        ),
    ]
    .into_iter()
    .map(|book| (book.isbn.clone(), book))
    .collect()
}
