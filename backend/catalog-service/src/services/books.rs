use crate::db::BookStore;
use crate::error::{CatalogError, Result};
use crate::models::{Book, BookPatch, NewBook};
use crypto_core::SubjectId;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Book catalog operations; writes are scoped to the caller
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    pub async fn create(&self, owner: SubjectId, book: NewBook) -> Result<u32> {
        book.validate()?;

        let id = self.books.create(owner, book).await?;
        info!(book_id = id, user_id = owner, "Book created");
        Ok(id)
    }

    pub async fn get(&self, id: u32) -> Result<Book> {
        self.books.get_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<Book>> {
        self.books.get_all().await
    }

    pub async fn update(&self, owner: SubjectId, id: u32, patch: BookPatch) -> Result<()> {
        if patch.is_empty() {
            return Err(CatalogError::Validation(
                "update structure has no values".to_string(),
            ));
        }

        self.books.update(owner, id, patch).await?;
        info!(book_id = id, user_id = owner, "Book updated");
        Ok(())
    }

    pub async fn delete(&self, owner: SubjectId, id: u32) -> Result<()> {
        self.books.delete(owner, id).await?;
        info!(book_id = id, user_id = owner, "Book deleted");
        Ok(())
    }
}
