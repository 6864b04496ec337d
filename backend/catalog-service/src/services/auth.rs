//! Authorization service
//!
//! Registers users, exchanges credentials for identity tokens, and resolves
//! tokens back to subject ids for the call interceptor.

use crate::db::UserStore;
use crate::error::{CatalogError, Result};
use crate::models::{NewUser, UserInsert};
use crate::security::CredentialHasher;
use chrono::Utc;
use crypto_core::{SubjectId, TokenCodec, TokenError};
use grpc_jwt_propagation::TokenResolver;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    codec: TokenCodec,
    token_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: CredentialHasher,
        codec: TokenCodec,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            token_ttl,
        }
    }

    /// Validate, hash and store a new user; returns the assigned id
    pub async fn register(&self, candidate: NewUser) -> Result<SubjectId> {
        candidate.validate()?;

        let password_hash = self.hasher.hash(&candidate.password)?;
        let id = self
            .users
            .create_user(UserInsert {
                name: candidate.name,
                username: candidate.username,
                password_hash,
            })
            .await?;

        info!(user_id = id, "User registered");
        Ok(id)
    }

    /// Check credentials and issue a token valid for the configured TTL
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let user = self.users.get_user(username).await?;

        if !self.hasher.verify(password, &user.password_hash) {
            debug!(user_id = user.id, "Password mismatch");
            return Err(CatalogError::InvalidCredentials);
        }

        let token = self
            .codec
            .issue(user.id, Utc::now(), self.token_ttl)
            .map_err(|e| CatalogError::Internal(e.to_string()))?;

        info!(user_id = user.id, "Token issued");
        Ok(token)
    }

    /// Map a token to its subject id
    pub fn resolve(&self, token: &str) -> Result<SubjectId> {
        self.codec.parse(token).map_err(|e| match e {
            TokenError::MalformedClaims => CatalogError::MissingSubjectClaim,
            _ => CatalogError::InvalidToken,
        })
    }
}

impl TokenResolver for AuthService {
    type Error = CatalogError;

    fn resolve(&self, token: &str) -> Result<SubjectId> {
        AuthService::resolve(self, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordSettings;
    use crate::db::MockUserStore;
    use crate::models::User;
    use serde_json::json;

    const TEST_SECRET: &str = "TEST_SECRET_KEY";

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(PasswordSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn service(users: MockUserStore) -> AuthService {
        AuthService::new(
            Arc::new(users),
            hasher(),
            TokenCodec::new(TEST_SECRET),
            chrono::Duration::hours(12),
        )
    }

    fn john() -> NewUser {
        NewUser {
            name: "John".into(),
            username: "john123".into(),
            password: "pass123".into(),
        }
    }

    fn stored_john() -> User {
        User {
            id: 10,
            name: "John".into(),
            username: "john123".into(),
            password_hash: hasher().hash("pass123").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut users = MockUserStore::new();
        users
            .expect_create_user()
            .withf(|u| {
                u.name == "John"
                    && u.username == "john123"
                    && u.password_hash != "pass123"
                    && hasher().verify("pass123", &u.password_hash)
            })
            .times(1)
            .returning(|_| Ok(1));

        assert_eq!(service(users).register(john()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validates_before_store() {
        let mut users = MockUserStore::new();
        users.expect_create_user().never();

        let candidate = NewUser {
            password: String::new(),
            ..john()
        };
        let err = service(users).register(candidate).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_propagates_store_error() {
        let mut users = MockUserStore::new();
        users
            .expect_create_user()
            .returning(|_| Err(CatalogError::UsernameTaken));

        let err = service(users).register(john()).await.unwrap_err();
        assert!(matches!(err, CatalogError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_authenticate_issues_token_for_subject() {
        let mut users = MockUserStore::new();
        let stored = stored_john();
        users
            .expect_get_user()
            .withf(|username| username == "john123")
            .returning(move |_| Ok(stored.clone()));

        let service = service(users);
        let token = service.authenticate("john123", "pass123").await.unwrap();

        assert_eq!(service.resolve(&token).unwrap(), 10);
    }

    #[tokio::test]
    async fn test_authenticate_with_unrepresentable_expiry_is_internal() {
        let mut users = MockUserStore::new();
        let stored = stored_john();
        users
            .expect_get_user()
            .returning(move |_| Ok(stored.clone()));

        let service = AuthService::new(
            Arc::new(users),
            hasher(),
            TokenCodec::new(TEST_SECRET),
            chrono::Duration::seconds(10_000_000_000_000),
        );
        let err = service.authenticate("john123", "pass123").await.unwrap_err();

        assert!(matches!(err, CatalogError::Internal(_)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut users = MockUserStore::new();
        let stored = stored_john();
        users
            .expect_get_user()
            .returning(move |_| Ok(stored.clone()));

        let err = service(users)
            .authenticate("john123", "wrongpass")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid password");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut users = MockUserStore::new();
        users
            .expect_get_user()
            .returning(|_| Err(CatalogError::UserNotFound));

        let err = service(users)
            .authenticate("nobody", "pass123")
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::UserNotFound));
    }

    #[test]
    fn test_resolve_garbage_token() {
        let err = service(MockUserStore::new()).resolve("badtoken").unwrap_err();
        assert_eq!(err.to_string(), "invalid token");
    }

    #[test]
    fn test_resolve_token_without_subject() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &json!({ "exp": Utc::now().timestamp() + 3600 }),
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let err = service(MockUserStore::new()).resolve(&token).unwrap_err();
        assert_eq!(err.to_string(), "user_id not found in token");
    }

    #[test]
    fn test_resolve_expired_token() {
        let token = TokenCodec::new(TEST_SECRET)
            .issue(10, Utc::now(), chrono::Duration::zero())
            .unwrap();

        let err = service(MockUserStore::new()).resolve(&token).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidToken));
    }

    #[test]
    fn test_resolver_trait_matches_inherent() {
        let service = service(MockUserStore::new());
        let token = TokenCodec::new(TEST_SECRET)
            .issue(7, Utc::now(), chrono::Duration::minutes(1))
            .unwrap();

        assert_eq!(TokenResolver::resolve(&service, &token).unwrap(), 7);
    }
}
