use crypto_core::SubjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: SubjectId,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Registration candidate as received from a client
#[derive(Clone, Validate, Deserialize)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<catalog_proto::User> for NewUser {
    fn from(user: catalog_proto::User) -> Self {
        Self {
            name: user.name,
            username: user.username,
            password: user.password,
        }
    }
}

/// Row handed to a user store; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInsert {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

/// Sign-in credentials
#[derive(Clone, Validate, Deserialize)]
pub struct Credentials {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl From<catalog_proto::SignInRequest> for Credentials {
    fn from(req: catalog_proto::SignInRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}
