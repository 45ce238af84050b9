//! Book storage held in process memory, for tests and local runs without a database

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

#[derive(Default)]
struct Inner {
    next_id: i32,
    books: BTreeMap<i32, Book>,
}

/// Mirrors the stored-function contract: ids start at 1, empty optional text is kept as `None`
#[derive(Default)]
pub struct InMemoryBookStore {
    inner: RwLock<Inner>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_book(id: i32, form: &BookForm, date_added: chrono::DateTime<Utc>) -> Book {
        Book {
            id,
            title: form.title.clone(),
            author: form.author.clone(),
            genre: BookForm::stored(&form.genre).map(str::to_string),
            publish_year: form.publish_year,
            publisher: BookForm::stored(&form.publisher).map(str::to_string),
            page_count: form.page_count,
            language: BookForm::stored(&form.language).map(str::to_string),
            date_added,
            table_of_contents: BookForm::stored(&form.table_of_contents).map(str::to_string),
        }
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn create(&self, book: &BookForm) -> AppResult<i32> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.books.insert(id, Self::to_book(id, book, Utc::now()));
        Ok(id)
    }

    async fn update(&self, book: &BookForm) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.books.get_mut(&book.id) {
            Some(existing) => {
                *existing = Self::to_book(book.id, book, existing.date_added);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
