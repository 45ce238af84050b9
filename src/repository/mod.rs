//! Repository layer for database operations

pub mod books;
pub mod memory;
pub mod row;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

pub use books::PgBookStore;
pub use memory::InMemoryBookStore;

/// Storage boundary for books.
///
/// `create` returns the new id, where a value `<= 0` means storage refused the
/// insert. `update` and `delete` return `false` when no row was affected.
/// Driver failures surface as `AppError::Database`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, in the order storage returns them
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, book: &BookForm) -> AppResult<i32>;

    async fn update(&self, book: &BookForm) -> AppResult<bool>;

    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}
