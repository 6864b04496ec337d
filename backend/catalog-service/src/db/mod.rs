/// Storage for users and books
///
/// Both stores are async traits so the services can run against PostgreSQL
/// (`users`, `books`) or the in-memory implementations (`memory`).
use crate::error::Result;
use crate::models::{Book, BookPatch, NewBook, User, UserInsert};
use async_trait::async_trait;
use crypto_core::SubjectId;

pub mod books;
pub mod memory;
pub mod users;

pub use books::PgBookStore;
pub use memory::{InMemoryBookStore, InMemoryUserStore};
pub use users::PgUserStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, failing with `UsernameTaken` on a duplicate username
    async fn create_user(&self, user: UserInsert) -> Result<SubjectId>;

    /// Look up by username, failing with `UserNotFound`
    async fn get_user(&self, username: &str) -> Result<User>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, owner: SubjectId, book: NewBook) -> Result<u32>;

    async fn get_all(&self) -> Result<Vec<Book>>;

    async fn get_by_id(&self, id: u32) -> Result<Book>;

    /// Owner-scoped; a missing or foreign book is `BookNotFound`
    async fn update(&self, owner: SubjectId, id: u32, patch: BookPatch) -> Result<()>;

    /// Owner-scoped; a missing or foreign book is `BookNotFound`
    async fn delete(&self, owner: SubjectId, id: u32) -> Result<()>;
}

/// Narrow a database id to the 32-bit wire id
pub(crate) fn to_wire_id(id: i64) -> Result<u32> {
    u32::try_from(id).map_err(|_| {
        crate::error::CatalogError::Internal(format!("id {} does not fit in 32 bits", id))
    })
}
