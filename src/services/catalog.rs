//! Catalog management service

use std::sync::Arc;

use chrono::{Datelike, Local};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm, BookFormView, BookList, DeleteConfirmation, FieldErrors},
    repository::BookStore,
};

pub const CREATE_FAILED: &str = "Could not create the book. Please try again.";
pub const UPDATE_FAILED: &str = "Could not update the book.";
pub const FUTURE_PUBLISH_YEAR: &str = "Publish year cannot be later than the current year";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const AUTHOR_REQUIRED: &str = "Author is required";

/// Result of submitting the create form
#[derive(Debug)]
pub enum CreateOutcome {
    /// New book id; show its details
    Created(i32),
    /// Form to render again with errors and the submitted values
    Rejected(BookFormView),
}

/// Result of submitting the edit form
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(i32),
    Rejected(BookFormView),
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing was deleted; go back to the confirmation page for this id
    Failed(i32),
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// Blank query; show the unfiltered list instead
    ShowAll,
    Results(BookList),
}

/// Calendar year used for the publish-year rule
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Field constraints first, then the publish-year rule, into one error set
pub fn validate_book(book: &BookForm, current_year: i32) -> FieldErrors {
    let mut errors = match book.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };
    // Whitespace passes the length check but is not a value
    for (field, value, message) in [
        ("title", &book.title, TITLE_REQUIRED),
        ("author", &book.author, AUTHOR_REQUIRED),
    ] {
        if value.trim().is_empty() && !errors.contains(field) {
            errors.add(field, message);
        }
    }
    if book.publish_year > current_year {
        errors.add("publish_year", FUTURE_PUBLISH_YEAR);
    }
    errors
}

/// Whether any of title, author, genre or publisher contains `term`, ignoring case
pub fn matches_term(book: &Book, term: &str) -> bool {
    let needle = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&book.title)
        || contains(&book.author)
        || book.genre.as_deref().is_some_and(contains)
        || book.publisher.as_deref().is_some_and(contains)
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.store.list_all().await
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Blank create form
    pub fn new_book_form(&self) -> BookFormView {
        BookFormView::new(BookForm::default(), current_year())
    }

    /// Validate and create a book
    pub async fn create_book(&self, book: BookForm) -> AppResult<CreateOutcome> {
        let year = current_year();
        let errors = validate_book(&book, year);
        if !errors.is_empty() {
            tracing::debug!("Catalog create: rejected with {:?}", errors);
            return Ok(CreateOutcome::Rejected(BookFormView::new(book, year).with_errors(errors)));
        }

        let new_id = self.store.create(&book).await?;
        if new_id > 0 {
            tracing::info!("Catalog create: book id={} \"{}\"", new_id, book.title);
            return Ok(CreateOutcome::Created(new_id));
        }

        tracing::warn!("Catalog create: storage returned id={} for \"{}\"", new_id, book.title);
        Ok(CreateOutcome::Rejected(
            BookFormView::new(book, year).with_error(CREATE_FAILED),
        ))
    }

    /// Edit form pre-filled with the stored values
    pub async fn edit_book_form(&self, id: i32) -> AppResult<BookFormView> {
        let book = self.get_book(id).await?;
        Ok(BookFormView::new(BookForm::from(&book), current_year()))
    }

    /// Validate and update a book. A payload id that differs from `id` is treated as not found.
    pub async fn update_book(&self, id: i32, book: BookForm) -> AppResult<UpdateOutcome> {
        if id != book.id {
            tracing::warn!("Catalog update: path id={} does not match payload id={}", id, book.id);
            return Err(AppError::book_not_found(id));
        }

        let year = current_year();
        let errors = validate_book(&book, year);
        if !errors.is_empty() {
            tracing::debug!("Catalog update: id={} rejected with {:?}", id, errors);
            return Ok(UpdateOutcome::Rejected(BookFormView::new(book, year).with_errors(errors)));
        }

        if self.store.update(&book).await? {
            tracing::info!("Catalog update: book id={}", id);
            return Ok(UpdateOutcome::Updated(id));
        }

        tracing::warn!("Catalog update: no row affected for id={}", id);
        Ok(UpdateOutcome::Rejected(
            BookFormView::new(book, year).with_error(UPDATE_FAILED),
        ))
    }

    /// Delete confirmation page
    pub async fn delete_confirmation(&self, id: i32, error: bool) -> AppResult<DeleteConfirmation> {
        let book = self.get_book(id).await?;
        Ok(DeleteConfirmation { book, error })
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i32) -> AppResult<DeleteOutcome> {
        if self.store.delete(id).await? {
            tracing::info!("Catalog delete: book id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            tracing::warn!("Catalog delete: no row affected for id={}", id);
            Ok(DeleteOutcome::Failed(id))
        }
    }

    /// Linear, case-insensitive search over the full list
    pub async fn search_books(&self, term: Option<&str>) -> AppResult<SearchOutcome> {
        let term = match term {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Ok(SearchOutcome::ShowAll),
        };

        let books: Vec<Book> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|b| matches_term(b, term))
            .collect();

        tracing::debug!("Catalog search: \"{}\" matched {} books", term, books.len());
        Ok(SearchOutcome::Results(BookList {
            books,
            search_term: Some(term.to_string()),
        }))
    }
}
