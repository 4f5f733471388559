//! Request handlers for `/books`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bookshelf_http::{ApiResult, AppError, Envelope, Reply};
use time::OffsetDateTime;

use super::filters::BookQuery;
use super::models::{
    new_book_id, Book, BookCreated, BookDetail, BookDraft, BookList, BookPayload, BookSummary,
    PayloadError,
};
use super::repository::SharedBookRepository;

const ADD_FAILED: &str = "Failed to add book";
const UPDATE_FAILED: &str = "Failed to update book";

fn validate(payload: BookPayload, context: &str) -> Result<BookDraft, AppError> {
    payload
        .validate()
        .map_err(|err: PayloadError| AppError::validation(format!("{context}. {err}")))
}

/// `POST /books`
pub async fn create_book(
    State(repository): State<SharedBookRepository>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> ApiResult<BookCreated> {
    let Json(payload) = payload?;
    let draft = validate(payload, ADD_FAILED)?;

    let book = Book::new(new_book_id(), draft, OffsetDateTime::now_utc());
    let book_id = book.id.clone();
    repository.insert(book).await?;

    if !repository.contains(&book_id).await? {
        tracing::error!(book_id = %book_id, "book missing right after insert");
        return Err(AppError::internal("Book failed to be added"));
    }

    tracing::info!(book_id = %book_id, "book added");
    Ok(Reply::created(
        Envelope::success(BookCreated { book_id }).with_message("Book added successfully"),
    ))
}

/// `GET /books`
pub async fn list_books(
    State(repository): State<SharedBookRepository>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> ApiResult<BookList> {
    let Query(query) = query?;
    let books = query
        .apply(repository.list().await?)
        .into_iter()
        .map(BookSummary::from)
        .collect::<Vec<_>>();

    tracing::debug!(count = books.len(), ?query, "listing books");
    Ok(Reply::ok(Envelope::success(BookList { books })))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
) -> ApiResult<BookDetail> {
    match repository.find(&id).await? {
        Some(book) => Ok(Reply::ok(Envelope::success(BookDetail { book }))),
        None => Err(AppError::not_found("Book not found")),
    }
}

/// `PUT /books/{id}`
///
/// The payload is validated before the id is looked up.
pub async fn update_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> ApiResult<()> {
    let Json(payload) = payload?;
    let draft = validate(payload, UPDATE_FAILED)?;

    if !repository
        .update(&id, draft, OffsetDateTime::now_utc())
        .await?
    {
        return Err(AppError::not_found(format!("{UPDATE_FAILED}. Id not found")));
    }

    tracing::info!(book_id = %id, "book updated");
    Ok(Reply::ok(Envelope::message("Book updated successfully")))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    if !repository.remove(&id).await? {
        return Err(AppError::not_found("Failed to delete book. Id not found"));
    }

    tracing::info!(book_id = %id, "book deleted");
    Ok(Reply::ok(Envelope::message("Book deleted successfully")))
}
