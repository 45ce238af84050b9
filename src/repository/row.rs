//! Column-by-column decoding of book rows.
//!
//! Every column is read on its own and merged with a default, so a row never
//! fails to map: NULL, missing or mistyped columns fall back to empty text,
//! `None`, zero or the Unix epoch. Faults other than NULL are logged, which
//! keeps schema drift visible without failing the request.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Row};

use crate::models::book::Book;

/// Typed access to a single column of a result row
pub trait ColumnReader {
    fn read_text(&self, column: &str) -> Result<Option<String>, sqlx::Error>;
    fn read_int(&self, column: &str) -> Result<Option<i32>, sqlx::Error>;
    fn read_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>, sqlx::Error>;
}

impl ColumnReader for PgRow {
    fn read_text(&self, column: &str) -> Result<Option<String>, sqlx::Error> {
        self.try_get(column)
    }

    fn read_int(&self, column: &str) -> Result<Option<i32>, sqlx::Error> {
        self.try_get(column)
    }

    fn read_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
        self.try_get(column)
    }
}

fn absorb<T>(column: &str, read: Result<Option<T>, sqlx::Error>) -> Option<T> {
    match read {
        Ok(value) => value,
        Err(e) => {
            // TODO: decide whether schema mismatches should fail the request instead of defaulting
            tracing::warn!(column, error = %e, "Column read failed, using default value");
            None
        }
    }
}

/// Map a result row to a `Book`, defaulting any unreadable column
pub fn decode_book<R: ColumnReader + ?Sized>(row: &R) -> Book {
    Book {
        id: absorb("book_id", row.read_int("book_id")).unwrap_or_default(),
        title: absorb("title", row.read_text("title")).unwrap_or_default(),
        author: absorb("author", row.read_text("author")).unwrap_or_default(),
        genre: absorb("genre", row.read_text("genre")),
        publish_year: absorb("publish_year", row.read_int("publish_year")).unwrap_or_default(),
        publisher: absorb("publisher", row.read_text("publisher")),
        page_count: absorb("page_count", row.read_int("page_count")).unwrap_or_default(),
        language: absorb("language", row.read_text("language")),
        date_added: absorb("date_added", row.read_timestamp("date_added")).unwrap_or_default(),
        table_of_contents: absorb("table_of_contents", row.read_text("table_of_contents")),
    }
}
