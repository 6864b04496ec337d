use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid password")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("username already exists")]
    UsernameTaken,

    #[error("book not found")]
    BookNotFound,

    #[error("invalid token")]
    InvalidToken,

    #[error("user_id not found in token")]
    MissingSubjectClaim,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            CatalogError::Validation(msg) => Status::new(Code::InvalidArgument, msg.clone()),
            CatalogError::InvalidCredentials
            | CatalogError::InvalidToken
            | CatalogError::MissingSubjectClaim => {
                Status::new(Code::Unauthenticated, self.to_string())
            }
            CatalogError::UserNotFound | CatalogError::BookNotFound => {
                Status::new(Code::NotFound, self.to_string())
            }
            CatalogError::UsernameTaken => Status::new(Code::AlreadyExists, self.to_string()),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                // Don't leak internal details
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }
}

// Conversions from external error types
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        CatalogError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

// gRPC Status conversion
impl From<CatalogError> for Status {
    fn from(err: CatalogError) -> Self {
        err.to_status()
    }
}
