//! Book catalog endpoints
//!
//! Form submissions answer with `303 See Other` on success, the way a
//! server-rendered form would, and with `422` plus the form view when the
//! input has to be corrected.

use axum::{
    extract::{FromRequest, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, BookForm, BookFormView, BookList, DeleteConfirmation},
    services::catalog::{CreateOutcome, DeleteOutcome, SearchOutcome, UpdateOutcome},
    AppState,
};

/// Public path of the book collection, used for redirects
pub const BOOKS_PATH: &str = "/api/v1/books";

fn details_path(id: i32) -> String {
    format!("{}/{}", BOOKS_PATH, id)
}

fn rejected(view: BookFormView) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response()
}

/// JSON book form; malformed bodies answer with the JSON error body
#[derive(Debug, Deserialize, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct BookPayload(pub BookForm);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Text to look for in title, author, genre and publisher
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Set after a failed delete
    pub error: Option<bool>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookList)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookList>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(BookList {
        books,
        search_term: None,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Empty create form with dropdown options
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "Create form", body = BookFormView)
    )
)]
pub async fn new_book_form(State(state): State<AppState>) -> Json<BookFormView> {
    Json(state.services.catalog.new_book_form())
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 303, description = "Created, redirect to the book details"),
        (status = 400, description = "Body is not a book form", body = ErrorResponse),
        (status = 422, description = "Invalid input or storage refused the book", body = BookFormView)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    BookPayload(form): BookPayload,
) -> AppResult<Response> {
    let response = match state.services.catalog.create_book(form).await? {
        CreateOutcome::Created(id) => Redirect::to(&details_path(id)).into_response(),
        CreateOutcome::Rejected(view) => rejected(view),
    };
    Ok(response)
}

/// Edit form pre-filled with the current values
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Edit form", body = BookFormView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookFormView>> {
    let view = state.services.catalog.edit_book_form(id).await?;
    Ok(Json(view))
}

/// Update an existing book
#[utoipa::path(
    post,
    path = "/books/{id}/edit",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 303, description = "Updated, redirect to the book details"),
        (status = 400, description = "Body is not a book form", body = ErrorResponse),
        (status = 404, description = "Payload id does not match the path"),
        (status = 422, description = "Invalid input or nothing was updated", body = BookFormView)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    BookPayload(form): BookPayload,
) -> AppResult<Response> {
    let response = match state.services.catalog.update_book(id, form).await? {
        UpdateOutcome::Updated(id) => Redirect::to(&details_path(id)).into_response(),
        UpdateOutcome::Rejected(view) => rejected(view),
    };
    Ok(response)
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID"), DeleteQuery),
    responses(
        (status = 200, description = "Book to delete", body = DeleteConfirmation),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<DeleteConfirmation>> {
    let page = state
        .services
        .catalog
        .delete_confirmation(id, query.error.unwrap_or(false))
        .await?;
    Ok(Json(page))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the list, or back to the confirmation page with error=true")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    let redirect = match state.services.catalog.delete_book(id).await? {
        DeleteOutcome::Deleted => Redirect::to(BOOKS_PATH),
        DeleteOutcome::Failed(id) => {
            Redirect::to(&format!("{}/delete?error=true", details_path(id)))
        }
    };
    Ok(redirect)
}

/// Search books by title, author, genre or publisher
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = BookList),
        (status = 303, description = "Blank query, redirect to the full list")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let response = match state
        .services
        .catalog
        .search_books(query.search_term.as_deref())
        .await?
    {
        SearchOutcome::ShowAll => Redirect::to(BOOKS_PATH).into_response(),
        SearchOutcome::Results(list) => Json(list).into_response(),
    };
    Ok(response)
}
