//! Book model, submitted form shape and validation errors

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::enums::SelectList;

/// Catalog entry as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publish_year: i32,
    pub publisher: Option<String>,
    pub page_count: i32,
    pub language: Option<String>,
    /// Set by storage when the book is created
    pub date_added: DateTime<Utc>,
    pub table_of_contents: Option<String>,
}

/// Reads a JSON `null` as the type's default so it reaches validation as a field error
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Book fields as submitted by a create or edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    /// Zero for new books
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, max = 200, message = "Title is required and must not exceed 200 characters"))]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, max = 150, message = "Author is required and must not exceed 150 characters"))]
    pub author: String,

    #[validate(length(max = 100, message = "Genre must not exceed 100 characters"))]
    pub genre: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1000, max = 2025, message = "Publish year must be between 1000 and 2025"))]
    pub publish_year: i32,

    #[validate(length(max = 150, message = "Publisher must not exceed 150 characters"))]
    pub publisher: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 1, max = 10000, message = "Page count must be between 1 and 10000"))]
    pub page_count: i32,

    #[validate(length(max = 50, message = "Language must not exceed 50 characters"))]
    pub language: Option<String>,

    pub table_of_contents: Option<String>,
}

impl BookForm {
    /// Optional text as it should reach storage: empty strings become NULL
    pub fn stored(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.is_empty())
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            publish_year: book.publish_year,
            publisher: book.publisher.clone(),
            page_count: book.page_count,
            language: book.language.clone(),
            table_of_contents: book.table_of_contents.clone(),
        }
    }
}

/// Validation messages keyed by form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

/// Everything a create/edit form needs to render
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookFormView {
    pub book: BookForm,
    pub errors: FieldErrors,
    /// Form-level error not tied to a field
    pub error: Option<String>,
    pub languages: SelectList,
    pub genres: SelectList,
    pub current_year: i32,
}

impl BookFormView {
    /// Form view with dropdowns pre-selected from the book's current values
    pub fn new(book: BookForm, current_year: i32) -> Self {
        let languages = SelectList::languages(book.language.as_deref());
        let genres = SelectList::genres(book.genre.as_deref());
        Self {
            book,
            errors: FieldErrors::new(),
            error: None,
            languages,
            genres,
            current_year,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// Delete confirmation page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub book: Book,
    /// Set when a previous delete attempt failed
    pub error: bool,
}

/// Book list, optionally filtered by a search term
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
    pub search_term: Option<String>,
}
