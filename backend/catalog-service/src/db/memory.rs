/// In-memory stores, used when no database is configured and in tests
use super::{BookStore, UserStore};
use crate::error::{CatalogError, Result};
use crate::models::{Book, BookPatch, NewBook, User, UserInsert};
use async_trait::async_trait;
use crypto_core::SubjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u32, T>,
    last_id: u32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> Result<u32> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| CatalogError::Internal("id space exhausted".to_string()))?;
        Ok(self.last_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Table<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: UserInsert) -> Result<SubjectId> {
        let mut table = self.users.write().await;

        if table.rows.values().any(|u| u.username == user.username) {
            return Err(CatalogError::UsernameTaken);
        }

        let id = table.next_id()?;
        table.rows.insert(
            id,
            User {
                id,
                name: user.name,
                username: user.username,
                password_hash: user.password_hash,
            },
        );
        Ok(id)
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        self.users
            .read()
            .await
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(CatalogError::UserNotFound)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Table<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, owner: SubjectId, book: NewBook) -> Result<u32> {
        let mut table = self.books.write().await;
        let id = table.next_id()?;
        table.rows.insert(
            id,
            Book {
                id,
                title: book.title,
                author: book.author,
                user_id: owner,
            },
        );
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: u32) -> Result<Book> {
        self.books
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(CatalogError::BookNotFound)
    }

    async fn update(&self, owner: SubjectId, id: u32, patch: BookPatch) -> Result<()> {
        let mut table = self.books.write().await;
        let book = table
            .rows
            .get_mut(&id)
            .filter(|b| b.user_id == owner)
            .ok_or(CatalogError::BookNotFound)?;

        patch.apply(book);
        Ok(())
    }

    async fn delete(&self, owner: SubjectId, id: u32) -> Result<()> {
        let mut table = self.books.write().await;
        match table.rows.get(&id) {
            Some(book) if book.user_id == owner => {
                table.rows.remove(&id);
                Ok(())
            }
            _ => Err(CatalogError::BookNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(username: &str) -> UserInsert {
        UserInsert {
            name: "John".into(),
            username: username.into(),
            password_hash: "$argon2id$fake".into(),
        }
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let store = InMemoryUserStore::new();

        assert_eq!(store.create_user(insert("john123")).await.unwrap(), 1);
        assert_eq!(store.create_user(insert("jane")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.create_user(insert("john123")).await.unwrap();

        let err = store.create_user(insert("john123")).await.unwrap_err();
        assert!(matches!(err, CatalogError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_get_user() {
        let store = InMemoryUserStore::new();
        let id = store.create_user(insert("john123")).await.unwrap();

        let user = store.get_user("john123").await.unwrap();
        assert_eq!(user.id, id);
        assert!(matches!(
            store.get_user("nobody").await,
            Err(CatalogError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_book_crud_is_owner_scoped() {
        let store = InMemoryBookStore::new();
        let id = store.create(10, dune()).await.unwrap();

        let patch = BookPatch::new("Dune Messiah".into(), String::new());
        assert!(matches!(
            store.update(11, id, patch.clone()).await,
            Err(CatalogError::BookNotFound)
        ));
        store.update(10, id, patch).await.unwrap();
        assert_eq!(store.get_by_id(id).await.unwrap().title, "Dune Messiah");

        assert!(matches!(
            store.delete(11, id).await,
            Err(CatalogError::BookNotFound)
        ));
        store.delete(10, id).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_book() {
        let store = InMemoryBookStore::new();

        assert!(matches!(
            store.get_by_id(99).await,
            Err(CatalogError::BookNotFound)
        ));
        assert!(matches!(
            store.delete(1, 99).await,
            Err(CatalogError::BookNotFound)
        ));
    }
}
