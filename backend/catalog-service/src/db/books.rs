/// Book database operations for catalog-service
use super::{to_wire_id, BookStore};
use crate::error::{CatalogError, Result};
use crate::models::{Book, BookPatch, NewBook};
use async_trait::async_trait;
use crypto_core::SubjectId;
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    user_id: i64,
}

impl TryFrom<BookRow> for Book {
    type Error = CatalogError;

    fn try_from(row: BookRow) -> Result<Self> {
        Ok(Book {
            id: to_wire_id(row.id)?,
            title: row.title,
            author: row.author,
            user_id: to_wire_id(row.user_id)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, owner: SubjectId, book: NewBook) -> Result<u32> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(i64::from(owner))
        .fetch_one(&self.pool)
        .await?;

        to_wire_id(id)
    }

    async fn get_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author, user_id FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn get_by_id(&self, id: u32) -> Result<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author, user_id FROM books WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::BookNotFound)?;

        row.try_into()
    }

    async fn update(&self, owner: SubjectId, id: u32, patch: BookPatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                author = COALESCE($2, author)
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(patch.title)
        .bind(patch.author)
        .bind(i64::from(id))
        .bind(i64::from(owner))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::BookNotFound);
        }
        Ok(())
    }

    async fn delete(&self, owner: SubjectId, id: u32) -> Result<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(i64::from(id))
            .bind(i64::from(owner))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::BookNotFound);
        }
        Ok(())
    }
}
