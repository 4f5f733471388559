use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

/// A stored book together with its reading progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book, assigned on creation
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Whether every page had been read when the book was added.
    /// Updates leave this untouched.
    pub finished: bool,
    /// Absent when the client never said; such a book matches neither
    /// reading flag value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from a validated draft
    pub fn new(id: String, draft: BookDraft, now: OffsetDateTime) -> Self {
        Self {
            finished: draft.page_count == draft.read_page,
            id,
            name: draft.name,
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.page_count,
            read_page: draft.read_page,
            reading: draft.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field with the draft's values.
    ///
    /// `id`, `inserted_at` and `finished` are kept as they are.
    pub fn apply(&mut self, draft: BookDraft, now: OffsetDateTime) {
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = now;
    }
}

/// Generate a fresh, time-ordered book id
pub fn new_book_id() -> String {
    Uuid::new_v7(Timestamp::now(NoContext)).to_string()
}

/// Request body for creating or replacing a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

/// Reasons a payload is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Please provide the book name")]
    MissingName,
    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

impl BookPayload {
    /// Check the payload; the name check runs before the page check.
    ///
    /// Missing page counts are treated as zero.
    pub fn validate(self) -> Result<BookDraft, PayloadError> {
        let name = self.name.ok_or(PayloadError::MissingName)?;

        let page_count = self.page_count.unwrap_or_default();
        let read_page = self.read_page.unwrap_or_default();
        if read_page > page_count {
            return Err(PayloadError::ReadPageExceedsPageCount);
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count,
            read_page,
            reading: self.reading,
        })
    }
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: Option<bool>,
}

/// Projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            publisher: book.publisher,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> BookPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_name_wins_over_page_check() {
        let err = payload(json!({"pageCount": 10, "readPage": 20}))
            .validate()
            .unwrap_err();
        assert_eq!(err, PayloadError::MissingName);
    }

    #[test]
    fn read_page_beyond_page_count_is_rejected() {
        let err = payload(json!({"name": "B", "pageCount": 100, "readPage": 150}))
            .validate()
            .unwrap_err();
        assert_eq!(err, PayloadError::ReadPageExceedsPageCount);
    }

    #[test]
    fn empty_name_is_accepted() {
        let draft = payload(json!({"name": ""})).validate().unwrap();
        assert_eq!(draft.name, "");
        assert_eq!(draft.reading, None);
    }

    #[test]
    fn finished_is_derived_on_creation() {
        let now = OffsetDateTime::now_utc();
        let done = payload(json!({"name": "A", "pageCount": 100, "readPage": 100}))
            .validate()
            .unwrap();
        let partial = payload(json!({"name": "C", "pageCount": 100, "readPage": 25}))
            .validate()
            .unwrap();

        assert!(Book::new(new_book_id(), done, now).finished);
        assert!(!Book::new(new_book_id(), partial, now).finished);
    }

    #[test]
    fn apply_keeps_identity_and_finished() {
        let created = OffsetDateTime::UNIX_EPOCH;
        let draft = payload(json!({"name": "A", "pageCount": 10, "readPage": 10}))
            .validate()
            .unwrap();
        let mut book = Book::new("fixed-id".to_string(), draft, created);

        let later = created + time::Duration::hours(1);
        let edit = payload(json!({"name": "A2", "pageCount": 50, "readPage": 5, "reading": true}))
            .validate()
            .unwrap();
        book.apply(edit, later);

        assert_eq!(book.id, "fixed-id");
        assert_eq!(book.name, "A2");
        assert_eq!(book.page_count, 50);
        assert_eq!(book.reading, Some(true));
        assert!(book.finished);
        assert_eq!(book.inserted_at, created);
        assert_eq!(book.updated_at, later);
    }

    #[test]
    fn book_serializes_with_camel_case_and_rfc3339() {
        let draft = payload(json!({"name": "A", "pageCount": 3, "readPage": 1}))
            .validate()
            .unwrap();
        let book = Book::new("id-1".to_string(), draft, OffsetDateTime::UNIX_EPOCH);
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(value["pageCount"], 3);
        assert_eq!(value["readPage"], 1);
        assert_eq!(value["insertedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(value["updatedAt"], value["insertedAt"]);
        assert!(value.get("reading").is_none());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_book_id(), new_book_id());
    }
}
