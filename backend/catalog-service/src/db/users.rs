/// User database operations for catalog-service
use super::{to_wire_id, UserStore};
use crate::error::{CatalogError, Result};
use crate::models::{User, UserInsert};
use async_trait::async_trait;
use crypto_core::SubjectId;
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    username: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = CatalogError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: to_wire_id(row.id)?,
            name: row.name,
            username: row.username,
            password_hash: row.password_hash,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: UserInsert) -> Result<SubjectId> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => to_wire_id(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(CatalogError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::UserNotFound)?;

        row.try_into()
    }
}
