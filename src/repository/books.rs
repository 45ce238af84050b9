//! Book storage backed by PostgreSQL stored functions

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{row::decode_book, BookStore};
use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

/// Calls the `usp_*` functions; each call holds one pooled connection for its duration
#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query("SELECT * FROM usp_get_all_books()")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.iter().map(decode_book).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query("SELECT * FROM usp_get_book_by_id($1)")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.as_ref().map(decode_book))
    }

    async fn create(&self, book: &BookForm) -> AppResult<i32> {
        let mut conn = self.pool.acquire().await?;
        let new_id: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT usp_create_book($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publish_year)
        .bind(book.page_count)
        .bind(BookForm::stored(&book.genre))
        .bind(BookForm::stored(&book.publisher))
        .bind(BookForm::stored(&book.language))
        .bind(BookForm::stored(&book.table_of_contents))
        .fetch_one(&mut *conn)
        .await?;
        Ok(new_id.unwrap_or(0))
    }

    async fn update(&self, book: &BookForm) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let affected: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT usp_update_book($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(BookForm::stored(&book.genre))
        .bind(book.publish_year)
        .bind(BookForm::stored(&book.publisher))
        .bind(book.page_count)
        .bind(BookForm::stored(&book.language))
        .bind(BookForm::stored(&book.table_of_contents))
        .fetch_one(&mut *conn)
        .await?;
        Ok(affected.unwrap_or(0) > 0)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let affected: Option<i32> = sqlx::query_scalar("SELECT usp_delete_book($1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(affected.unwrap_or(0) > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
