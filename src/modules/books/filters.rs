//! Pure narrowing functions used by the list endpoint.

use serde::Deserialize;

use super::models::Book;

/// Tri-state flag taken from a `"1"` / `"0"` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagFilter {
    True,
    False,
    /// Absent or unrecognised; the flag is not filtered on.
    #[default]
    Unset,
}

impl FlagFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("1") => FlagFilter::True,
            Some("0") => FlagFilter::False,
            _ => FlagFilter::Unset,
        }
    }

    fn admits(self, value: Option<bool>) -> bool {
        match self {
            FlagFilter::True => value == Some(true),
            FlagFilter::False => value == Some(false),
            FlagFilter::Unset => true,
        }
    }
}

/// Raw query string of `GET /books`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl BookQuery {
    /// Apply name, then reading, then finished
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        let books = match &self.name {
            Some(name) => filter_by_name(books, name),
            None => books,
        };
        let books = filter_by_reading(books, FlagFilter::parse(self.reading.as_deref()));
        filter_by_finished(books, FlagFilter::parse(self.finished.as_deref()))
    }
}

/// Keep books whose name contains `needle`, ignoring case
pub fn filter_by_name(books: Vec<Book>, needle: &str) -> Vec<Book> {
    let needle = needle.to_lowercase();
    books
        .into_iter()
        .filter(|book| book.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn filter_by_reading(books: Vec<Book>, flag: FlagFilter) -> Vec<Book> {
    books
        .into_iter()
        .filter(|book| flag.admits(book.reading))
        .collect()
}

pub fn filter_by_finished(books: Vec<Book>, flag: FlagFilter) -> Vec<Book> {
    books
        .into_iter()
        .filter(|book| flag.admits(Some(book.finished)))
        .collect()
}
